//! Fresh-identifier allocation (spec §4.1). Two independent counters, reset
//! at the start of every unit.

#[derive(Default)]
pub struct NameAllocator {
    temp: u32,
    err: u32,
}

impl NameAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_temp(&mut self) -> String {
        let name = format!("__tmp{}", self.temp);
        self.temp += 1;
        name
    }

    pub fn next_err(&mut self) -> String {
        let name = format!("__err{}", self.err);
        self.err += 1;
        name
    }

    pub fn reset(&mut self) {
        self.temp = 0;
        self.err = 0;
    }
}
