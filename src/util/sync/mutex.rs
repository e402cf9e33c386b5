use std::ops::{Deref, DerefMut};

#[cfg(loom)]
pub struct Mutex<Inner> {
    inner: loom::sync::Mutex<Inner>,
}

#[cfg(loom)]
impl<Inner> Mutex<Inner> {
    pub fn new(value: Inner) -> Self {
        Self {
            inner: loom::sync::Mutex::new(value),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Inner> {
        MutexGuard {
            inner: Some(self.inner.lock().unwrap()),
        }
    }

    pub fn into_inner(self) -> Inner {
        self.inner.into_inner().unwrap()
    }
}

#[cfg(not(loom))]
pub struct Mutex<Inner> {
    inner: parking_lot::Mutex<Inner>,
}

#[cfg(not(loom))]
impl<Inner> Mutex<Inner> {
    pub fn new(value: Inner) -> Self {
        Self {
            inner: parking_lot::Mutex::new(value),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Inner> {
        MutexGuard {
            inner: self.inner.lock(),
        }
    }

    pub fn into_inner(self) -> Inner {
        self.inner.into_inner()
    }
}

// Loom's condition variable consumes the guard while waiting, so it is held in an option that is
// only empty for the duration of a wait
#[cfg(loom)]
pub struct MutexGuard<'a, Inner> {
    pub(super) inner: Option<loom::sync::MutexGuard<'a, Inner>>,
}

#[cfg(not(loom))]
pub struct MutexGuard<'a, Inner> {
    pub(super) inner: parking_lot::MutexGuard<'a, Inner>,
}

#[cfg(loom)]
impl<'a, Inner> Deref for MutexGuard<'a, Inner> {
    type Target = Inner;

    fn deref(&self) -> &Inner {
        self.inner.as_ref().unwrap().deref()
    }
}

#[cfg(loom)]
impl<'a, Inner> DerefMut for MutexGuard<'a, Inner> {
    fn deref_mut(&mut self) -> &mut Inner {
        self.inner.as_mut().unwrap().deref_mut()
    }
}

#[cfg(not(loom))]
impl<'a, Inner> Deref for MutexGuard<'a, Inner> {
    type Target = Inner;

    fn deref(&self) -> &Inner {
        self.inner.deref()
    }
}

#[cfg(not(loom))]
impl<'a, Inner> DerefMut for MutexGuard<'a, Inner> {
    fn deref_mut(&mut self) -> &mut Inner {
        self.inner.deref_mut()
    }
}
