#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use services::{ApiError, StudyApi};
use study_core::model::{Feedback, PdfDocument, Question, QuestionSet, Score};

/// Scripted `StudyApi` that replays queued responses and counts calls.
#[derive(Default)]
pub struct FakeApi {
    uploads: Mutex<VecDeque<Result<QuestionSet, ApiError>>>,
    validations: Mutex<VecDeque<Result<Feedback, ApiError>>>,
    upload_calls: AtomicUsize,
    validate_calls: AtomicUsize,
    last_answer: Mutex<Option<String>>,
}

impl FakeApi {
    pub fn push_upload(&self, response: Result<QuestionSet, ApiError>) {
        self.uploads.lock().unwrap().push_back(response);
    }

    pub fn push_validation(&self, response: Result<Feedback, ApiError>) {
        self.validations.lock().unwrap().push_back(response);
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn last_answer(&self) -> Option<String> {
        self.last_answer.lock().unwrap().clone()
    }
}

#[async_trait]
impl StudyApi for FakeApi {
    async fn upload_document(&self, _document: &PdfDocument) -> Result<QuestionSet, ApiError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.uploads
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected upload call")
    }

    async fn validate_answer(
        &self,
        _question: &str,
        _context: &str,
        answer: &str,
    ) -> Result<Feedback, ApiError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_answer.lock().unwrap() = Some(answer.to_string());
        self.validations
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected validate call")
    }
}

pub fn question(text: &str, category: &str) -> Question {
    Question {
        question: text.to_string(),
        category: category.to_string(),
        context: "France is a country in Europe. Its capital is Paris.".to_string(),
        difficulty: "easy".to_string(),
        hint: "It is on the Seine.".to_string(),
        key_points: vec!["Paris".to_string()],
    }
}

pub fn question_set() -> QuestionSet {
    QuestionSet::new(
        vec![question("What is the capital of France?", "knowledge")],
        vec![
            question("Why did Paris become the capital?", "analysis"),
            question("Describe the Seine's role.", "analysis"),
        ],
        vec![question("Recall the capital of France.", "knowledge")],
        vec![question("Name the capital of France.", "exam")],
    )
}

pub fn feedback(score: u8, text: &str) -> Feedback {
    Feedback {
        score: Score::new(score).unwrap(),
        feedback: text.to_string(),
        strengths: vec!["Correct city".to_string()],
        improvements: vec![],
        tip: "Mention the river.".to_string(),
    }
}

pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF".to_vec()
}

/// In-memory store whose writes wait until `release` hands out permits.
pub struct GatedStore {
    inner: storage::repository::InMemoryRepository,
    permits: tokio::sync::Semaphore,
}

impl GatedStore {
    pub fn new() -> Self {
        Self {
            inner: storage::repository::InMemoryRepository::new(),
            permits: tokio::sync::Semaphore::new(0),
        }
    }

    pub fn release(&self) {
        self.permits.add_permits(64);
    }
}

#[async_trait]
impl storage::repository::KeyValueStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, storage::repository::StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), storage::repository::StorageError> {
        self.permits.acquire().await.unwrap().forget();
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), storage::repository::StorageError> {
        self.inner.remove(key).await
    }

    async fn keys_with_prefix(
        &self,
        prefix: &str,
    ) -> Result<Vec<String>, storage::repository::StorageError> {
        self.inner.keys_with_prefix(prefix).await
    }
}
