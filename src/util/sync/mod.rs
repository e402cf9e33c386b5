pub mod condvar;
pub mod mutex;
