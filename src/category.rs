//! The canonical transaction categories.
//!
//! Categories are a fixed set of twenty labels. The declaration order of
//! [Category::ALL] is the canonical order used everywhere a list of
//! categories is rendered (form selects, chart legends, breakdown lists) so
//! that the display stays stable across renders regardless of the order
//! transactions arrive in.

use std::fmt::Display;

/// One of the twenty canonical transaction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Food and household groceries.
    Groceries,
    /// Salary, wages and other employment income.
    SalaryWages,
    /// Rent or mortgage payments.
    RentMortgage,
    /// Shopping and clothing.
    ShoppingClothing,
    /// Power, water and other utilities.
    Utilities,
    /// Internet and phone plans.
    InternetPhone,
    /// Public transport, fuel and vehicle costs.
    Transportation,
    /// Maintenance and repairs.
    MaintenanceRepairs,
    /// Medical and health costs.
    MedicalHealth,
    /// Education and childcare.
    EducationChildcare,
    /// Entertainment and subscriptions.
    EntertainmentSubscriptions,
    /// Hobbies and leisure.
    HobbiesLeisure,
    /// Travel and vacations.
    TravelVacations,
    /// Gifts and donations.
    GiftsDonations,
    /// Office supplies.
    OfficeSupplies,
    /// Training and courses.
    TrainingCourses,
    /// Emergency fund contributions.
    EmergencyFund,
    /// Investments.
    Investments,
    /// Retirement contributions.
    RetirementContributions,
    /// Anything that does not fit the other categories.
    Other,
}

impl Category {
    /// Every category in canonical declaration order.
    pub const ALL: [Category; 20] = [
        Category::Groceries,
        Category::SalaryWages,
        Category::RentMortgage,
        Category::ShoppingClothing,
        Category::Utilities,
        Category::InternetPhone,
        Category::Transportation,
        Category::MaintenanceRepairs,
        Category::MedicalHealth,
        Category::EducationChildcare,
        Category::EntertainmentSubscriptions,
        Category::HobbiesLeisure,
        Category::TravelVacations,
        Category::GiftsDonations,
        Category::OfficeSupplies,
        Category::TrainingCourses,
        Category::EmergencyFund,
        Category::Investments,
        Category::RetirementContributions,
        Category::Other,
    ];

    /// The display label for the category. This is also the form the
    /// category takes in the database and over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::SalaryWages => "Salary / Wages",
            Category::RentMortgage => "Rent / Mortgage",
            Category::ShoppingClothing => "Shopping / Clothing",
            Category::Utilities => "Utilities",
            Category::InternetPhone => "Internet / Phone",
            Category::Transportation => "Transportation",
            Category::MaintenanceRepairs => "Maintenance / Repairs",
            Category::MedicalHealth => "Medical / Health",
            Category::EducationChildcare => "Education / Childcare",
            Category::EntertainmentSubscriptions => "Entertainment / Subscriptions",
            Category::HobbiesLeisure => "Hobbies / Leisure",
            Category::TravelVacations => "Travel / Vacations",
            Category::GiftsDonations => "Gifts / Donations",
            Category::OfficeSupplies => "Office Supplies",
            Category::TrainingCourses => "Training / Courses",
            Category::EmergencyFund => "Emergency Fund",
            Category::Investments => "Investments",
            Category::RetirementContributions => "Retirement Contributions",
            Category::Other => "Other",
        }
    }

    /// Map a raw label back to its category.
    ///
    /// Returns `None` for labels outside the canonical set. Such labels are
    /// tolerated on stored transactions but are left out of the per-category
    /// summaries.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == label)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
