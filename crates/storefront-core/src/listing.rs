// Merged catalog state and the filtered/sorted/paginated view derived from it
use std::collections::HashMap;

use crate::ledger::IdSet;
use crate::models::{ProductCard, ProductId};
use crate::status::RequestStatus;

/// Products per page on the list screen
pub const PAGE_SIZE: usize = 6;

/// Price ordering. Toggling walks not-applied -> asc -> desc -> not-applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSort {
    /// Fall back to id order
    #[default]
    NotApplied,
    Asc,
    Desc,
}

impl PriceSort {
    pub fn next(self) -> Self {
        match self {
            PriceSort::NotApplied => PriceSort::Asc,
            PriceSort::Asc => PriceSort::Desc,
            PriceSort::Desc => PriceSort::NotApplied,
        }
    }
}

impl std::fmt::Display for PriceSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceSort::NotApplied => write!(f, "none"),
            PriceSort::Asc => write!(f, "price ↑"),
            PriceSort::Desc => write!(f, "price ↓"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filters {
    pub favorite_only: bool,
    pub price_sort: PriceSort,
}

/// Output of one derivation pass
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    /// Every product passing the filters, in display order
    pub filtered: Vec<ProductCard>,
    pub page: usize,
    pub page_count: usize,
    pub visible: Vec<ProductCard>,
}

/// Pure view derivation.
///
/// Deleted products go first, then the sort, then the favorite filter, then
/// paging. `page` comes back clamped into `[1, max(page_count, 1)]`.
pub fn derive_view(
    raw: &[ProductCard],
    deleted: &IdSet,
    favorites: &IdSet,
    filters: Filters,
    page: usize,
    page_size: usize,
) -> DerivedView {
    let mut products: Vec<ProductCard> = raw
        .iter()
        .filter(|product| !deleted.contains(&product.id))
        .cloned()
        .collect();

    // sort_by is stable, so equal prices keep their merged order
    match filters.price_sort {
        PriceSort::NotApplied => products.sort_by(|a, b| a.id.cmp(&b.id)),
        PriceSort::Asc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        PriceSort::Desc => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    if filters.favorite_only {
        products.retain(|product| favorites.contains(&product.id));
    }

    let page_size = page_size.max(1);
    let page_count = products.len().div_ceil(page_size);
    let page = page.clamp(1, page_count.max(1));

    let visible = products
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    DerivedView {
        filtered: products,
        page,
        page_count,
        visible,
    }
}

/// Everything the list screen reads
#[derive(Debug, Clone)]
pub struct ListingState {
    /// Both catalogs in source order, A before B
    pub raw_catalog: Vec<ProductCard>,
    pub favorites: IdSet,
    pub deleted: IdSet,
    pub filters: Filters,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub filtered_count: usize,
    pub visible_page: Vec<ProductCard>,

    pub catalog_status: RequestStatus,
    pub favorite_list_status: RequestStatus,
    pub deleted_list_status: RequestStatus,
    pub favorite_update_status: HashMap<ProductId, RequestStatus>,
    pub delete_status: HashMap<ProductId, RequestStatus>,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            raw_catalog: Vec::new(),
            favorites: IdSet::new(),
            deleted: IdSet::new(),
            filters: Filters::default(),
            page: 1,
            page_size: PAGE_SIZE,
            page_count: 0,
            filtered_count: 0,
            visible_page: Vec::new(),
            catalog_status: RequestStatus::Idle,
            favorite_list_status: RequestStatus::Idle,
            deleted_list_status: RequestStatus::Idle,
            favorite_update_status: HashMap::new(),
            delete_status: HashMap::new(),
        }
    }
}

impl ListingState {
    /// Replace the merged catalog, dropping anything already deleted
    pub fn set_catalog(&mut self, merged: Vec<ProductCard>) {
        self.raw_catalog = merged
            .into_iter()
            .filter(|product| !self.deleted.contains(&product.id))
            .collect();
        self.recompute();
    }

    pub fn set_favorites(&mut self, favorites: IdSet) {
        self.favorites = favorites;
        self.recompute();
    }

    pub fn set_deleted(&mut self, deleted: IdSet) {
        self.deleted = deleted;
        self.recompute();
    }

    /// Re-derive the visible page from the current raw state
    pub fn recompute(&mut self) {
        let view = derive_view(
            &self.raw_catalog,
            &self.deleted,
            &self.favorites,
            self.filters,
            self.page,
            self.page_size,
        );

        self.page = view.page;
        self.page_count = view.page_count;
        self.filtered_count = view.filtered.len();
        self.visible_page = view.visible;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.recompute();
    }

    pub fn set_favorite_only(&mut self, favorite_only: bool) {
        self.filters.favorite_only = favorite_only;
        self.recompute();
    }

    pub fn set_price_sort(&mut self, price_sort: PriceSort) {
        self.filters.price_sort = price_sort;
        self.recompute();
    }

    pub fn cycle_price_sort(&mut self) -> PriceSort {
        self.set_price_sort(self.filters.price_sort.next());
        self.filters.price_sort
    }

    /// Allow a fresh full catalog load on next view
    pub fn invalidate_catalog(&mut self) {
        self.catalog_status = RequestStatus::Idle;
    }

    pub fn is_favorite(&self, id: &ProductId) -> bool {
        self.favorites.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::parse_id_list;
    use crate::models::ApiType;
    use rust_decimal::Decimal;

    fn card(id: ProductId, price: i64) -> ProductCard {
        let api_type = match id {
            ProductId::Numeric(_) => ApiType::DummyJson,
            ProductId::Text(_) => ApiType::Airtable,
        };
        ProductCard {
            title: format!("product {}", id),
            id,
            description: String::new(),
            thumbnail: String::new(),
            price: Decimal::from(price),
            api_type,
        }
    }

    fn numbered(count: u64) -> Vec<ProductCard> {
        (1..=count)
            .map(|n| card(ProductId::Numeric(n), (n as i64 * 7) % 10))
            .collect()
    }

    fn ids(products: &[ProductCard]) -> Vec<ProductId> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_deleted_ids_never_visible() {
        let raw = numbered(20);
        let deleted = parse_id_list(Some("2,5,11,19,recGhost"));
        let favorites = parse_id_list(Some("2,3"));

        for favorite_only in [false, true] {
            for price_sort in [PriceSort::NotApplied, PriceSort::Asc, PriceSort::Desc] {
                let filters = Filters {
                    favorite_only,
                    price_sort,
                };
                for page in 0..5 {
                    let view = derive_view(&raw, &deleted, &favorites, filters, page, PAGE_SIZE);
                    assert!(view.filtered.iter().all(|p| !deleted.contains(&p.id)));
                    assert!(view.visible.iter().all(|p| !deleted.contains(&p.id)));
                }
            }
        }
    }

    #[test]
    fn test_three_toggles_return_to_unsorted() {
        let mut sort = PriceSort::NotApplied;
        sort = sort.next();
        assert_eq!(sort, PriceSort::Asc);
        sort = sort.next();
        assert_eq!(sort, PriceSort::Desc);
        sort = sort.next();
        assert_eq!(sort, PriceSort::NotApplied);
    }

    #[test]
    fn test_sort_orders_apply_to_filtered_list() {
        let mut raw = numbered(9);
        raw.push(card(ProductId::Text("recB".into()), 4));
        raw.push(card(ProductId::Text("recA".into()), 1));
        let none = IdSet::new();

        let by_id = derive_view(&raw, &none, &none, Filters::default(), 1, PAGE_SIZE);
        let mut expected = ids(&raw);
        expected.sort();
        assert_eq!(ids(&by_id.filtered), expected);

        let asc = Filters {
            price_sort: PriceSort::Asc,
            ..Filters::default()
        };
        let view = derive_view(&raw, &none, &none, asc, 1, PAGE_SIZE);
        assert!(view.filtered.windows(2).all(|w| w[0].price <= w[1].price));

        let desc = Filters {
            price_sort: PriceSort::Desc,
            ..Filters::default()
        };
        let view = derive_view(&raw, &none, &none, desc, 1, PAGE_SIZE);
        assert!(view.filtered.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_equal_prices_keep_source_order() {
        let raw = vec![
            card(ProductId::Numeric(3), 5),
            card(ProductId::Numeric(1), 5),
            card(ProductId::Numeric(2), 1),
        ];
        let none = IdSet::new();
        let asc = Filters {
            price_sort: PriceSort::Asc,
            ..Filters::default()
        };

        let view = derive_view(&raw, &none, &none, asc, 1, PAGE_SIZE);
        assert_eq!(
            ids(&view.filtered),
            vec![ProductId::Numeric(2), ProductId::Numeric(3), ProductId::Numeric(1)]
        );
    }

    #[test]
    fn test_favorite_only_filters_after_sort() {
        let raw = numbered(10);
        let favorites = parse_id_list(Some("9,4,1"));
        let filters = Filters {
            favorite_only: true,
            price_sort: PriceSort::NotApplied,
        };

        let view = derive_view(&raw, &IdSet::new(), &favorites, filters, 1, PAGE_SIZE);
        assert_eq!(
            ids(&view.visible),
            vec![ProductId::Numeric(1), ProductId::Numeric(4), ProductId::Numeric(9)]
        );
        assert_eq!(view.page_count, 1);
    }

    #[test]
    fn test_seven_items_split_six_and_one() {
        let raw = numbered(7);
        let none = IdSet::new();

        let first = derive_view(&raw, &none, &none, Filters::default(), 1, PAGE_SIZE);
        assert_eq!(first.page_count, 2);
        assert_eq!(first.visible.len(), 6);

        let second = derive_view(&raw, &none, &none, Filters::default(), 2, PAGE_SIZE);
        assert_eq!(second.visible.len(), 1);
        assert_eq!(second.visible[0].id, ProductId::Numeric(7));
    }

    #[test]
    fn test_page_is_clamped() {
        let raw = numbered(13);
        let none = IdSet::new();

        for requested in 0..10 {
            let view = derive_view(&raw, &none, &none, Filters::default(), requested, PAGE_SIZE);
            assert_eq!(view.page_count, 3);
            assert!(view.page >= 1 && view.page <= 3);
        }

        let empty = derive_view(&[], &none, &none, Filters::default(), 4, PAGE_SIZE);
        assert_eq!(empty.page_count, 0);
        assert_eq!(empty.page, 1);
        assert!(empty.visible.is_empty());
    }

    #[test]
    fn test_state_clamps_page_when_filter_shrinks_list() {
        let mut state = ListingState::default();
        state.set_catalog(numbered(13));
        state.set_page(3);
        assert_eq!(state.page, 3);

        state.set_favorites(parse_id_list(Some("1,2")));
        state.set_favorite_only(true);
        assert_eq!(state.page_count, 1);
        assert_eq!(state.page, 1);
        assert_eq!(state.visible_page.len(), 2);
    }

    #[test]
    fn test_set_catalog_drops_already_deleted() {
        let mut state = ListingState::default();
        state.set_deleted(parse_id_list(Some("1,2")));
        state.set_catalog(numbered(4));

        assert_eq!(state.raw_catalog.len(), 2);
        assert_eq!(state.filtered_count, 2);
    }

    #[test]
    fn test_cycle_price_sort_recomputes() {
        let mut state = ListingState::default();
        state.set_catalog(numbered(5));

        assert_eq!(state.cycle_price_sort(), PriceSort::Asc);
        assert!(state.visible_page.windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(state.cycle_price_sort(), PriceSort::Desc);
        assert_eq!(state.cycle_price_sort(), PriceSort::NotApplied);
        assert_eq!(state.visible_page[0].id, ProductId::Numeric(1));
    }
}
