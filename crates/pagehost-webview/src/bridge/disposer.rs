use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

/// Something with a release hook tied to an owner's lifetime.
pub trait Disposable {
    fn dispose(&self);
}

/// Releases registered children when its owner is torn down.
///
/// Children are disposed in reverse registration order, exactly once, either
/// by [`dispose_all`](Self::dispose_all) or on drop.
#[derive(Default)]
pub struct Disposer {
    children: RefCell<Vec<Rc<dyn Disposable>>>,
    disposed: Cell<bool>,
}

impl Disposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tie `child` to this disposer. A child registered after disposal is
    /// released immediately.
    pub fn register(&self, child: Rc<dyn Disposable>) {
        if self.disposed.get() {
            warn!("registering with an already disposed owner; releasing child now");
            child.dispose();
            return;
        }
        self.children.borrow_mut().push(child);
    }

    pub fn dispose_all(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let children = std::mem::take(&mut *self.children.borrow_mut());
        debug!(count = children.len(), "disposing children");
        for child in children.iter().rev() {
            child.dispose();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Disposable for Recorder {
        fn dispose(&self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Rc<dyn Disposable> {
        Rc::new(Recorder {
            name,
            log: Rc::clone(log),
        })
    }

    #[test]
    fn disposes_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let disposer = Disposer::new();
        disposer.register(recorder("first", &log));
        disposer.register(recorder("second", &log));
        assert_eq!(disposer.len(), 2);

        disposer.dispose_all();
        assert_eq!(*log.borrow(), vec!["second", "first"]);
        assert!(disposer.is_empty());
    }

    #[test]
    fn dispose_all_is_idempotent_and_drop_does_not_repeat() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let disposer = Disposer::new();
        disposer.register(recorder("only", &log));

        disposer.dispose_all();
        disposer.dispose_all();
        drop(disposer);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn drop_disposes_children() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let disposer = Disposer::new();
            disposer.register(recorder("child", &log));
        }
        assert_eq!(*log.borrow(), vec!["child"]);
    }

    #[test]
    fn late_registration_is_released_immediately() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let disposer = Disposer::new();
        disposer.dispose_all();
        disposer.register(recorder("late", &log));
        assert_eq!(*log.borrow(), vec!["late"]);
        assert!(disposer.is_disposed());
    }
}
