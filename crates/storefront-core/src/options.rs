// Choices offered by the create form. The value is what the user picks,
// the label is what ends up stored on the product.
use crate::create::SelectOption;
use crate::{Error, Result};

pub const CATEGORIES: &[(&str, &str)] = &[
    ("beauty", "beauty"),
    ("fragrances", "fragrances"),
    ("furniture", "furniture"),
    ("groceries", "groceries"),
    ("home-decoration", "home-decoration"),
    ("kitchen-accessories", "kitchen-accessories"),
    ("laptops", "laptops"),
    ("mens-shirts", "mens-shirts"),
    ("mens-shoes", "mens-shoes"),
    ("mens-watches", "mens-watches"),
    ("mobile-accessories", "mobile-accessories"),
    ("motorcycle", "motorcycle"),
    ("skin-care", "skin-care"),
    ("smartphones", "smartphones"),
    ("sports-accessories", "sports-accessories"),
    ("sunglasses", "sunglasses"),
    ("tablets", "tablets"),
    ("tops", "tops"),
    ("vehicle", "vehicle"),
    ("womens-bags", "womens-bags"),
    ("womens-dresses", "womens-dresses"),
    ("womens-jewellery", "womens-jewellery"),
    ("womens-shoes", "womens-shoes"),
    ("womens-watches", "womens-watches"),
];

pub const WARRANTIES: &[(&str, &str)] = &[
    ("1-month-warranty", "1 month warranty"),
    ("3-months-warranty", "3 months warranty"),
    ("6-months-warranty", "6 months warranty"),
    ("1-year-warranty", "1 year warranty"),
    ("2-years-warranty", "2 years warranty"),
    ("3-years-warranty", "3 years warranty"),
    ("5-years-warranty", "5 years warranty"),
    ("10-years-warranty", "10 years warranty"),
    ("lifetime-warranty", "Lifetime warranty"),
];

pub const SHIPPING: &[(&str, &str)] = &[
    ("ships-in-1-week", "Ships in 1 week"),
    ("ships-in-2-weeks", "Ships in 2 weeks"),
    ("ships-in-1-month", "Ships in 1 month"),
    ("ships-in-2-months", "Ships in 2 months"),
    ("ships-in-3-months", "Ships in 3 months"),
    ("ships-in-1-day", "Ships in 1 day"),
    ("ships-in-3-days", "Ships in 3 days"),
    ("ships-same-day", "Ships same day"),
    ("ships-asap", "Ships as soon as possible"),
];

pub const AVAILABILITY: &[(&str, &str)] = &[
    ("in_stock", "In Stock"),
    ("low_stock", "Low Stock"),
    ("out_of_stock", "Out of Stock"),
    ("preorder", "Preorder"),
    ("discontinued", "Discontinued"),
];

pub const RETURN_POLICIES: &[(&str, &str)] = &[
    ("30_days", "30 days return policy"),
    ("60_days", "60 days return policy"),
    ("14_days", "14 days return policy"),
    ("no_return", "No return policy"),
    ("custom", "Custom return policy"),
];

/// Find `value` in one of the catalogues above
pub fn lookup(field: &'static str, choices: &[(&str, &str)], value: &str) -> Result<SelectOption> {
    choices
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(v, label)| SelectOption::new(*v, *label))
        .ok_or_else(|| {
            let known: Vec<&str> = choices.iter().map(|(v, _)| *v).collect();
            Error::field(
                field,
                format!("unknown option {:?}, expected one of {}", value, known.join(", ")),
            )
        })
}
