//! Minimal logging trait: a dependency-free seam so the library can
//! report non-fatal conditions (`PoolExhausted`, `EmitterFailure`,
//! `MissingInput`) without forcing a particular logging framework on
//! consumers.

pub trait Logger {
    fn log(&mut self, msg: &str);
}

impl<T> Logger for &mut T
where
    T: Logger,
{
    fn log(&mut self, msg: &str) {
        T::log(self, msg);
    }
}

pub struct PrintLogger {
    name: String,
}

impl PrintLogger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> PrintLogger {
        PrintLogger { name: name.into() }
    }
}

impl Logger for PrintLogger {
    fn log(&mut self, msg: &str) {
        eprintln!("[{}] {}", self.name, msg);
    }
}

#[derive(Default)]
pub struct NothingLogger {}

impl NothingLogger {
    #[must_use]
    pub const fn new() -> NothingLogger {
        NothingLogger {}
    }
}

impl Logger for NothingLogger {
    fn log(&mut self, _msg: &str) {}
}
