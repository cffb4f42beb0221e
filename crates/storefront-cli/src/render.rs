// Plain-text rendering for the terminal
use storefront_core::{
    format::{format_currency, format_date, to_millimeters},
    listing::ListingState,
    Product,
};

const CURRENCY: &str = "USD";

pub fn listing(state: &ListingState) -> String {
    let mut lines = Vec::new();

    if state.visible_page.is_empty() {
        lines.push(if state.filters.favorite_only {
            "No favorites yet.".to_string()
        } else {
            "No products.".to_string()
        });
    }

    for card in &state.visible_page {
        let star = if state.is_favorite(&card.id) { "★" } else { " " };
        lines.push(format!(
            "{} {:<20} {:<9} {:>12}  {}",
            star,
            card.id,
            card.api_type,
            format_currency(card.price, CURRENCY),
            card.title
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Page {}/{} · {} products · sort: {}{}",
        state.page,
        state.page_count.max(1),
        state.filtered_count,
        state.filters.price_sort,
        if state.filters.favorite_only {
            " · favorites only"
        } else {
            ""
        }
    ));

    lines.join("\n") + "\n"
}

pub fn product(product: &Product) -> String {
    let card = &product.card;
    let dims = &product.dimensions;

    let mut lines = vec![
        format!("{} ({} · {})", card.title, card.id, card.api_type),
        format!("  {}", card.description),
        String::new(),
        format!("  Price         {}", format_currency(card.price, CURRENCY)),
        format!("  Rating        {:.1}", product.rating),
        format!("  Category      {}", product.category),
        format!("  Brand         {}", product.brand),
        format!("  SKU           {}", product.sku),
        format!("  Stock         {}", product.stock),
        format!("  Availability  {}", product.availability_status),
        format!("  Min. order    {}", product.minimum_order_quantity),
        format!("  Weight        {}", product.weight),
        format!(
            "  Size          {} × {} × {}",
            to_millimeters(dims.width),
            to_millimeters(dims.height),
            to_millimeters(dims.depth)
        ),
        format!("  Warranty      {}", product.warranty_information),
        format!("  Shipping      {}", product.shipping_information),
        format!("  Returns       {}", product.return_policy),
        format!("  Barcode       {}", product.meta.barcode),
        format!("  Added         {}", format_date(&product.meta.created_at)),
    ];

    if !card.thumbnail.is_empty() {
        lines.push(format!("  Thumbnail     {}", card.thumbnail));
    }
    for image in &product.images {
        lines.push(format!("  Image         {}", image));
    }

    if !product.reviews.is_empty() {
        lines.push(String::new());
        lines.push(format!("Reviews ({})", product.reviews.len()));
        for review in &product.reviews {
            lines.push(format!(
                "  {}{} {} · {}",
                "★".repeat(review.rating as usize),
                "☆".repeat(5usize.saturating_sub(review.rating as usize)),
                review.reviewer_name,
                format_date(&review.date)
            ));
            lines.push(format!("    {}", review.comment));
        }
    }

    lines.join("\n") + "\n"
}
