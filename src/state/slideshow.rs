use std::rc::Rc;
use yew::Reducible;

// Slideshow cursor: wraps in both directions, pausable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slideshow {
    pub index: usize,
    pub len: usize,
    pub paused: bool,
}

impl Slideshow {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            paused: false,
        }
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Keeps the cursor valid when the list changes underneath it.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
    }

    pub fn current<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideshowAction {
    Next,
    Prev,
    TogglePause,
    Resize(usize),
}

impl Reducible for Slideshow {
    type Action = SlideshowAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = *self;
        match action {
            SlideshowAction::Next => new.next(),
            SlideshowAction::Prev => new.prev(),
            SlideshowAction::TogglePause => new.toggle_pause(),
            SlideshowAction::Resize(len) => new.resize(len),
        }
        if new == *self { self } else { Rc::new(new) }
    }
}
