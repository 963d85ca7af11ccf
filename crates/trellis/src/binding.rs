use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to caller-owned state.
///
/// Widgets read and write the value through the handle while drawing; the
/// caller keeps a clone and sees every change. Clones share one cell.
///
/// Access is not re-entrant: touching a binding from inside its own
/// [`with`](Self::with) or [`with_mut`](Self::with_mut) closure panics.
pub struct Binding<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> Binding<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }

    #[track_caller]
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.cell.try_borrow() {
            Ok(value) => f(&value),
            Err(_) => reentrant::<T>(),
        }
    }

    #[track_caller]
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        match self.cell.try_borrow_mut() {
            Ok(mut value) => f(&mut value),
            Err(_) => reentrant::<T>(),
        }
    }

    #[track_caller]
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }

    #[track_caller]
    pub fn replace(&self, value: T) -> T {
        self.with_mut(|slot| std::mem::replace(slot, value))
    }

    /// Whether both handles point at the same state.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Clone> Binding<T> {
    #[track_caller]
    pub fn get(&self) -> T {
        self.with(T::clone)
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Default> Default for Binding<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Binding<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.try_borrow() {
            Ok(value) => f.debug_tuple("Binding").field(&*value).finish(),
            Err(_) => f.write_str("Binding(<borrowed>)"),
        }
    }
}

#[track_caller]
fn reentrant<T>() -> ! {
    panic!(
        "Binding<{}> accessed while already borrowed; a widget must not touch its own binding re-entrantly",
        std::any::type_name::<T>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let a = Binding::new(1);
        let b = a.clone();
        b.set(5);
        assert_eq!(a.get(), 5);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Binding::new(5)));
    }

    #[test]
    fn test_replace_returns_previous() {
        let text = Binding::new(String::from("old"));
        assert_eq!(text.replace("new".into()), "old");
        assert_eq!(text.with(|t| t.len()), 3);
    }

    #[test]
    #[should_panic(expected = "re-entrantly")]
    fn test_reentrant_access_panics() {
        let value = Binding::new(0);
        value.with(|_| value.set(1));
    }
}
