use crate::common::key::KeySchema;

/// A named, independently keyed group of records.
///
/// This is the only thing that differs between the Books and Reviews endpoints;
/// the dispatcher is written once against it.
///
/// ```rust
/// use bookshelf_crud::collection::Collection;
///
/// let reviews = Collection::reviews("Reviews");
/// assert_eq!(reviews.added_message(), "Review added successfully");
/// assert_eq!(reviews.none_found_message(), "No reviews found");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collection {
    /// DynamoDB table backing the collection.
    pub table_name: String,
    /// First path segment that selects this collection, e.g. `books`.
    pub route: String,
    /// Display name of one record, e.g. `Book`.
    pub entity: String,
    /// Display name of many records, lower case, e.g. `books`.
    pub entity_plural: String,
    /// Key attribute(s) identifying a record.
    pub key_schema: KeySchema,
}

impl Collection {
    /// Books, keyed by `book_id`.
    pub fn books(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            route: "books".to_string(),
            entity: "Book".to_string(),
            entity_plural: "books".to_string(),
            key_schema: KeySchema::single("book_id"),
        }
    }

    /// Reviews, keyed by `review_id` and `book_id` together.
    pub fn reviews(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            route: "reviews".to_string(),
            entity: "Review".to_string(),
            entity_plural: "reviews".to_string(),
            key_schema: KeySchema::composite("review_id", "book_id"),
        }
    }

    /// `<Entity> added successfully`
    pub fn added_message(&self) -> String {
        format!("{} added successfully", self.entity)
    }

    /// `<Entity> updated successfully`
    pub fn updated_message(&self) -> String {
        format!("{} updated successfully", self.entity)
    }

    /// `<Entity> deleted successfully`
    pub fn deleted_message(&self) -> String {
        format!("{} deleted successfully", self.entity)
    }

    /// `<Entity> not found`
    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.entity)
    }

    /// `No <entities> found`
    pub fn none_found_message(&self) -> String {
        format!("No {} found", self.entity_plural)
    }

    /// `Error <verb> <entity>`, e.g. `Error updating book`.
    pub fn failure_message(&self, verb: &str) -> String {
        format!("Error {verb} {}", self.entity.to_lowercase())
    }

    /// `Error <verb> <entities>`, for whole-collection operations.
    pub fn failure_message_plural(&self, verb: &str) -> String {
        format!("Error {verb} {}", self.entity_plural)
    }
}
