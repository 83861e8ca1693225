use crate::types::{AttributePath, Diagnostic, Dynamic};

/// Validator checks a configured, known attribute value
pub trait Validator: Send + Sync {
    fn description(&self) -> String;

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>);
}

/// Accepts only strings from a fixed allow-list
pub struct StringInSlice {
    pub allowed: Vec<String>,
    pub ignore_case: bool,
}

impl StringInSlice {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            ignore_case: false,
        }
    }

    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.allowed.iter().any(|a| {
            if self.ignore_case {
                a.eq_ignore_ascii_case(candidate)
            } else {
                a == candidate
            }
        })
    }
}

impl Validator for StringInSlice {
    fn description(&self) -> String {
        format!("value must be one of: {:?}", self.allowed)
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        let Some(s) = value.as_str() else {
            return;
        };
        if !self.contains(s) {
            diagnostics.push(
                Diagnostic::error(
                    format!("Invalid value for {}", path),
                    format!("expected {} to be one of {:?}, got {}", path, self.allowed, s),
                )
                .with_attribute(path.clone()),
            );
        }
    }
}

pub struct StringLengthBetween {
    pub min: usize,
    pub max: usize,
}

impl Validator for StringLengthBetween {
    fn description(&self) -> String {
        format!("string length must be between {} and {}", self.min, self.max)
    }

    fn validate(&self, value: &Dynamic, path: &AttributePath, diagnostics: &mut Vec<Diagnostic>) {
        let Some(s) = value.as_str() else {
            return;
        };
        let len = s.chars().count();
        if len < self.min || len > self.max {
            diagnostics.push(
                Diagnostic::error(
                    format!("Invalid length for {}", path),
                    format!(
                        "expected length of {} to be in the range ({} - {}), got {}",
                        path, self.min, self.max, len
                    ),
                )
                .with_attribute(path.clone()),
            );
        }
    }
}
