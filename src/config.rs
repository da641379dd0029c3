use regex::Regex;

#[derive(Clone)]
pub(crate) struct Config {
    workers: usize,
    field_separator: char,
    ignore_lines: Option<Regex>,
}

impl Config {
    pub(crate) fn new(
        workers: usize,
        field_separator: char,
        ignore_lines: Option<Regex>,
    ) -> Config {
        Config {
            workers,
            field_separator,
            ignore_lines,
        }
    }

    pub(crate) fn workers(&self) -> usize {
        self.workers
    }

    pub(crate) fn field_separator(&self) -> char {
        self.field_separator
    }

    pub(crate) fn ignore_lines(&self) -> &Option<Regex> {
        &self.ignore_lines
    }
}
