use serde_json::Value;
use tracing::debug;

use crate::{error::PaginateError, param::Param};

pub const DEFAULT_ITEMS_PER_PAGE: u64 = 4;

/// Returned by the index queries for indices outside the valid range.
pub const OUT_OF_RANGE: i64 = -1;

/// Page arithmetic over a collection of fixed size.
///
/// Only the length of the collection is kept. Later changes to the
/// collection are not seen by an existing paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    item_count: u64,
    items_per_page: u64,
    page_count: u64,
}

impl Paginator {
    pub fn new<T>(
        collection: &[T],
        items_per_page: impl Into<Param>,
    ) -> Result<Self, PaginateError> {
        Self::from_item_count(collection.len(), items_per_page)
    }

    pub fn with_default_page_size<T>(collection: &[T]) -> Result<Self, PaginateError> {
        Self::new(collection, DEFAULT_ITEMS_PER_PAGE)
    }

    /// Builds a paginator over a JSON document, which must be an array.
    pub fn from_json(
        collection: &Value,
        items_per_page: impl Into<Param>,
    ) -> Result<Self, PaginateError> {
        let items = collection
            .as_array()
            .ok_or_else(|| PaginateError::InvalidCollection(json_kind(collection)))?;
        Self::new(items, items_per_page)
    }

    pub fn from_item_count(
        item_count: usize,
        items_per_page: impl Into<Param>,
    ) -> Result<Self, PaginateError> {
        let items_per_page = items_per_page.into().to_integer("items_per_page")?;
        if items_per_page < 1 {
            return Err(PaginateError::InvalidPageSize(items_per_page));
        }

        let item_count = item_count as u64;
        let items_per_page = items_per_page as u64;
        let page_count = if item_count == 0 {
            0
        } else {
            item_count.div_ceil(items_per_page)
        };

        debug!(item_count, items_per_page, page_count, "paginator created");
        Ok(Self {
            item_count,
            items_per_page,
            page_count,
        })
    }

    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    pub fn page_count(&self) -> u64 {
        self.page_count
    }

    /// Number of items on the zero-based page `page_index`, or
    /// [`OUT_OF_RANGE`] when there is no such page.
    ///
    /// The last page of a multi-page collection reports
    /// `floor(item_count / page_count - 1)`. That is not always the number
    /// of items actually left on it: 8 items at 4 per page report 3.
    pub fn page_item_count(&self, page_index: impl Into<Param>) -> Result<i64, PaginateError> {
        let page_index = page_index
            .into()
            .to_integer("page_index passed to page_item_count")?;
        if page_index < 0 || page_index as u64 >= self.page_count {
            return Ok(OUT_OF_RANGE);
        }

        let page_index = page_index as u64;
        let count = if self.page_count == 1 {
            self.item_count
        } else if page_index == self.page_count - 1 {
            // page_count <= item_count, so the quotient is at least 1
            self.item_count / self.page_count - 1
        } else {
            self.items_per_page
        };
        Ok(count as i64)
    }

    /// Zero-based page holding the item at `item_index`, or [`OUT_OF_RANGE`]
    /// when the collection has no such item.
    pub fn page_index(&self, item_index: impl Into<Param>) -> Result<i64, PaginateError> {
        let item_index = item_index
            .into()
            .to_integer("item_index passed to page_index")?;
        if item_index < 0 || item_index as u64 >= self.item_count {
            return Ok(OUT_OF_RANGE);
        }

        let item_index = item_index as u64;
        if item_index < self.items_per_page {
            return Ok(0);
        }
        Ok((item_index / self.items_per_page) as i64)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn zero_items_zero_pages() {
        let items: [u8; 0] = [];
        let pager = Paginator::new(&items, 10).unwrap();
        assert_eq!(pager.page_count(), 0);
        assert_eq!(pager.item_count(), 0);
        assert_eq!(pager.page_item_count(0), Ok(OUT_OF_RANGE));
        assert_eq!(pager.page_index(0), Ok(OUT_OF_RANGE));
    }

    #[test]
    fn twenty_three_items_size_ten() {
        let items: Vec<u32> = (0..23).collect();
        let pager = Paginator::new(&items, 10).unwrap();
        assert_eq!(pager.page_count(), 3);
        assert_eq!(pager.page_item_count(0), Ok(10));
        assert_eq!(pager.page_item_count(1), Ok(10));
        assert_eq!(pager.page_index(22), Ok(2));
        assert_eq!(pager.page_index(23), Ok(OUT_OF_RANGE));
    }

    #[test]
    fn default_page_size_is_four() {
        let pager = Paginator::with_default_page_size(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(pager.items_per_page(), 4);
        assert_eq!(pager.page_count(), 2);
    }

    #[test]
    fn single_page_holds_everything() {
        let pager = Paginator::from_item_count(3, "4").unwrap();
        assert_eq!(pager.page_count(), 1);
        assert_eq!(pager.page_item_count(0), Ok(3));
        assert_eq!(pager.page_item_count(1), Ok(OUT_OF_RANGE));
    }

    #[test]
    fn last_page_uses_quotient_formula() {
        let pager = Paginator::from_item_count(13, 3).unwrap();
        assert_eq!(pager.page_count(), 5);
        assert_eq!(pager.page_item_count(4), Ok(1));

        // 8 items at 4 per page really leave 4 on the last page
        let pager = Paginator::from_item_count(8, 4).unwrap();
        assert_eq!(pager.page_item_count(1), Ok(3));
    }

    #[test]
    fn string_indices_are_coerced() {
        let pager = Paginator::from_item_count(13, 3).unwrap();
        assert_eq!(pager.page_index("4"), Ok(1));
        assert_eq!(pager.page_index(" 12 "), Ok(4));
        assert_eq!(pager.page_index("-2"), Ok(OUT_OF_RANGE));
        assert_eq!(pager.page_item_count("0x1"), Ok(3));
    }

    #[test]
    fn malformed_indices_are_errors_not_sentinels() {
        let pager = Paginator::from_item_count(6, 4).unwrap();
        let err = pager.page_index(1.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonInteger);
        let err = pager.page_item_count("two").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonInteger);
        let err = pager.page_index(i64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsafeInteger);
    }

    #[test]
    fn page_size_validation_order() {
        let kind = |p: Param| Paginator::from_item_count(3, p).unwrap_err().kind();
        assert_eq!(kind(Param::from(0)), ErrorKind::InvalidPageSize);
        assert_eq!(kind(Param::from("-4")), ErrorKind::InvalidPageSize);
        assert_eq!(kind(Param::from(1.2)), ErrorKind::NonInteger);
        assert_eq!(kind(Param::from("haha")), ErrorKind::NonInteger);
        // unsafe magnitude is reported before the sign
        assert_eq!(
            kind(Param::from(-9_007_199_254_740_992i64)),
            ErrorKind::UnsafeInteger
        );
    }

    #[test]
    fn json_collection_must_be_an_array() {
        let pager = Paginator::from_json(&json!(["a", null, {}, [1, 2]]), 3).unwrap();
        assert_eq!(pager.item_count(), 4);
        assert_eq!(pager.page_count(), 2);

        let err = Paginator::from_json(&json!({"0": 1, "1": 2}), 4).unwrap_err();
        assert_eq!(err, PaginateError::InvalidCollection("object"));
        let err = Paginator::from_json(&json!("abcd"), 4).unwrap_err();
        assert_eq!(err, PaginateError::InvalidCollection("string"));
    }

    #[test]
    fn collection_changes_are_not_seen() {
        let mut items = vec![1, 2, 3];
        let pager = Paginator::new(&items, 2).unwrap();
        items.extend([4, 5, 6]);
        assert_eq!(pager.item_count(), 3);
        assert_eq!(pager.page_index(4), Ok(OUT_OF_RANGE));
    }
}
