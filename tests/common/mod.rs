//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use solution_diagram::{ConnectEvent, DeleteEvent, DropEvent};
use std::cell::RefCell;
use std::rc::Rc;

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tracks intent handler invocations for testing.
///
/// Each field records calls to the corresponding handler with their payload.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// (source, destination)
    pub connect: Rc<RefCell<Vec<ConnectEvent>>>,
    /// (id, x, y)
    pub drop: Rc<RefCell<Vec<DropEvent>>>,
    /// (id,)
    pub delete: Rc<RefCell<Vec<DeleteEvent>>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        self.connect.borrow_mut().clear();
        self.drop.borrow_mut().clear();
        self.delete.borrow_mut().clear();
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.delete.borrow().iter().map(|e| e.id.clone()).collect()
    }

    pub fn connected_pairs(&self) -> Vec<(String, String)> {
        self.connect
            .borrow()
            .iter()
            .map(|e| (e.source.clone(), e.destination.clone()))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.connect.borrow().len() + self.drop.borrow().len() + self.delete.borrow().len()
    }
}
