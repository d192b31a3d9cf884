use std::sync::{Arc, Mutex};

use rxtrack::subscribe::Subscriber;

/// Records every notification delivered to the subscribers it hands out.
#[derive(Clone, Default)]
pub struct Emissions {
    pub nexts: Arc<Mutex<Vec<i32>>>,
    pub completes: Arc<Mutex<usize>>,
    pub errors: Arc<Mutex<Vec<String>>>,
}

impl Emissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber(&self) -> Subscriber<i32> {
        let nexts = Arc::clone(&self.nexts);
        let errors = Arc::clone(&self.errors);
        let completes = Arc::clone(&self.completes);

        Subscriber::new(
            move |n| {
                // Track next() calls.
                nexts.lock().unwrap().push(n);
            },
            move |e| {
                // Track error() calls.
                errors.lock().unwrap().push(e.to_string());
            },
            move || {
                // Track complete() calls.
                *completes.lock().unwrap() += 1;
            },
        )
    }

    pub fn values(&self) -> Vec<i32> {
        self.nexts.lock().unwrap().clone()
    }

    pub fn completes(&self) -> usize {
        *self.completes.lock().unwrap()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}
