use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

pub fn build_chunk_schema(dim: i32) -> Arc<Schema> {
	Arc::new(Schema::new(vec![
		Field::new("id", DataType::Utf8, false),
		Field::new("doc_name", DataType::Utf8, false),
		Field::new("source", DataType::Utf8, false),
		Field::new("page", DataType::Int32, false),
		Field::new("chunk_index", DataType::Int32, false),
		Field::new("text", DataType::Utf8, false),
		Field::new("vector", DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), dim), true),
	]))
}

pub fn build_meta_schema() -> Arc<Schema> {
	Arc::new(Schema::new(vec![
		Field::new("key", DataType::Utf8, false),
		Field::new("value", DataType::Utf8, false),
	]))
}
