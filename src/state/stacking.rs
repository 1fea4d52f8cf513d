use std::cell::Cell;
use std::rc::Rc;

/// Shared "highest z so far" counter. Cloning yields another handle to the same counter.
#[derive(Clone, Debug, Default)]
pub struct StackOrder {
    top: Rc<Cell<i32>>,
}

impl StackOrder {
    pub fn new(top: i32) -> Self {
        Self {
            top: Rc::new(Cell::new(top)),
        }
    }

    pub fn top(&self) -> i32 {
        self.top.get()
    }

    /// Sets the counter to `max_z` unless it is already higher.
    pub fn seed(&self, max_z: i32) {
        if max_z > self.top.get() {
            self.top.set(max_z);
        }
    }

    pub fn raise(&self) -> i32 {
        let next = self.top.get().saturating_add(1);
        self.top.set(next);
        next
    }
}

impl PartialEq for StackOrder {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.top, &other.top)
    }
}
