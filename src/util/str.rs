pub(crate) trait StringExt {
    fn trim_in_place(&mut self);
}

impl StringExt for String {
    fn trim_in_place(&mut self) {
        self.truncate(self.trim_end().len());

        let start = self.len() - self.trim_start().len();
        if start > 0 {
            self.drain(..start);
        }
    }
}

pub(crate) trait StrExt {
    fn starts_with_ignore_case(&self, start: &str) -> bool;

    /// [`None`] if the string is empty after trimming.
    fn non_blank(&self) -> Option<&str>;
}

impl StrExt for str {
    fn starts_with_ignore_case(&self, start: &str) -> bool {
        self.len() >= start.len()
            && self.is_char_boundary(start.len())
            && self[..start.len()].eq_ignore_ascii_case(start)
    }

    fn non_blank(&self) -> Option<&str> {
        let trimmed = self.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
