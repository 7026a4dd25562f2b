//! Rule-based seniority labels.

/// Seniority band derived from years of experience.
///
/// Bands: `(10, ∞)` Senior, `(5, 10]` Mid-Level, `(2, 5]` Junior, everything
/// else Trainee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Two years or less.
    Trainee,
    /// More than two, up to five.
    Junior,
    /// More than five, up to ten.
    MidLevel,
    /// More than ten.
    Senior,
}

impl Classification {
    /// Pick the band for `years`. First matching band wins.
    #[must_use]
    pub fn from_experience(years: f64) -> Self {
        if years > 10.0 {
            Classification::Senior
        } else if years > 5.0 {
            Classification::MidLevel
        } else if years > 2.0 {
            Classification::Junior
        } else {
            Classification::Trainee
        }
    }

    /// The label stored in `Prediccion_IA`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Classification::Trainee => "Trainee",
            Classification::Junior => "Junior",
            Classification::MidLevel => "Mid-Level",
            Classification::Senior => "Senior",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
