/// Category point ceilings for the automated score.
/// Education 40 / Experience 20 / Training 10 / Eligibility 10 /
/// Accomplishments 5 = 85 points; the remaining 15 are reserved for manually
/// entered interview and aptitude scores.
pub const CATEGORY_MAXIMA: CategoryMaxima = CategoryMaxima {
    education: 40.0,
    experience: 20.0,
    training: 10.0,
    eligibility: 10.0,
    accomplishments: 5.0,
};

/// Total automated points available before penalties.
pub const AUTOMATED_MAX: f64 = 85.0;

/// Points reserved for manual interview/aptitude entry.
pub const MANUAL_RESERVED: f64 = 15.0;

#[derive(Debug, Clone, Copy)]
pub struct CategoryMaxima {
    pub education: f64,
    pub experience: f64,
    pub training: f64,
    pub eligibility: f64,
    pub accomplishments: f64,
}

impl CategoryMaxima {
    pub fn sum(&self) -> f64 {
        self.education + self.experience + self.training + self.eligibility + self.accomplishments
    }
}
