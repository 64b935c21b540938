//! The tabular input type for resumen.
//!
//! A [`Table`] is an immutable, in-memory table backed by Arrow
//! `RecordBatch`es. It is the only input the analyzers accept; file parsing
//! happens here, at the boundary, so the analysis core never touches I/O.
//!
//! Missing values are Arrow nulls. A zero-row table is valid and every
//! analyzer degrades to an empty or zero result for it; a batch vector with
//! no batches has no schema to adopt and is rejected at construction.

use std::{path::Path, sync::Arc};

use arrow::{array::RecordBatch, datatypes::SchemaRef};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{Error, Result};

/// An immutable in-memory table of named, row-aligned columns.
///
/// # Example
///
/// ```no_run
/// use resumen::Table;
///
/// let table = Table::from_csv("data/sales.csv").unwrap();
/// println!("{} rows x {} columns", table.len(), table.n_cols());
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
    row_count: usize,
}

impl Table {
    /// Creates a table from a vector of RecordBatches.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch vector is empty or the batches have
    /// inconsistent schemas.
    pub fn new(batches: Vec<RecordBatch>) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Err(Error::EmptyTable);
        };
        let schema = first.schema();

        for (i, batch) in batches.iter().enumerate().skip(1) {
            if batch.schema() != schema {
                return Err(Error::schema_mismatch(format!(
                    "batch {} has a different schema than batch 0",
                    i
                )));
            }
        }

        let row_count = batches.iter().map(|b| b.num_rows()).sum();

        Ok(Self {
            batches,
            schema,
            row_count,
        })
    }

    /// Creates a table from a single RecordBatch.
    ///
    /// # Errors
    ///
    /// Currently infallible for any well-formed batch; returns `Result` for
    /// parity with [`Table::new`].
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        Self::new(vec![batch])
    }

    /// Creates a table with the given schema and no rows.
    pub fn empty(schema: SchemaRef) -> Self {
        Self {
            batches: vec![RecordBatch::new_empty(Arc::clone(&schema))],
            schema,
            row_count: 0,
        }
    }

    /// Loads a table from a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, is not valid Parquet,
    /// or contains no batches.
    pub fn from_parquet(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(Error::Parquet)?;
        let reader = builder.build().map_err(Error::Parquet)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyTable);
        }

        Self::new(batches)
    }

    /// Loads a table from a CSV file, inferring the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Loads a table from a CSV file with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the file contains no batches.
    pub fn from_csv_with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        use std::io::{BufReader, Seek, SeekFrom};

        use arrow_csv::{reader::Format, ReaderBuilder};

        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let mut buf_reader = BufReader::new(file);

        let schema = if let Some(schema) = options.schema {
            Arc::new(schema)
        } else {
            let mut format = Format::default().with_header(options.has_header);
            if let Some(delim) = options.delimiter {
                format = format.with_delimiter(delim);
            }
            let (inferred, _) = format
                .infer_schema(&mut buf_reader, Some(1000))
                .map_err(Error::Arrow)?;

            buf_reader
                .seek(SeekFrom::Start(0))
                .map_err(|e| Error::io(e, path))?;

            Arc::new(inferred)
        };

        let mut builder = ReaderBuilder::new(schema)
            .with_batch_size(options.batch_size)
            .with_header(options.has_header);

        if let Some(delim) = options.delimiter {
            builder = builder.with_delimiter(delim);
        }

        let reader = builder.build(buf_reader).map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyTable);
        }

        Self::new(batches)
    }

    /// Loads a table from a CSV string, inferring the schema.
    ///
    /// Intended for tests and small inline datasets.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid CSV.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        use std::io::Cursor;

        use arrow_csv::{reader::Format, ReaderBuilder};

        let mut cursor_for_infer = Cursor::new(data.as_bytes());
        let format = Format::default().with_header(true);
        let (inferred, _) = format
            .infer_schema(&mut cursor_for_infer, Some(1000))
            .map_err(Error::Arrow)?;

        let schema = Arc::new(inferred);
        let cursor = Cursor::new(data.as_bytes());

        let builder = ReaderBuilder::new(schema)
            .with_batch_size(8192)
            .with_header(true);

        let reader = builder.build(cursor).map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyTable);
        }

        Self::new(batches)
    }

    /// Loads a table from a JSON Lines (JSONL) file.
    ///
    /// Each line should be a JSON object representing one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_with_options(path, JsonOptions::default())
    }

    /// Loads a table from a JSON Lines file with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or the file contains no batches.
    pub fn from_json_with_options(path: impl AsRef<Path>, options: JsonOptions) -> Result<Self> {
        use std::io::BufReader;

        use arrow_json::ReaderBuilder;

        let path = path.as_ref();

        let schema = if let Some(schema) = options.schema {
            Arc::new(schema)
        } else {
            let infer_file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
            let infer_reader = BufReader::new(infer_file);
            let (inferred, _) = arrow_json::reader::infer_json_schema(infer_reader, Some(1000))
                .map_err(Error::Arrow)?;
            Arc::new(inferred)
        };

        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let buf_reader = BufReader::new(file);

        let builder = ReaderBuilder::new(schema).with_batch_size(options.batch_size);
        let reader = builder.build(buf_reader).map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            return Err(Error::EmptyTable);
        }

        Self::new(batches)
    }

    /// Returns the total number of rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Returns the number of columns.
    pub fn n_cols(&self) -> usize {
        self.schema.fields().len()
    }

    /// Returns the schema of the table.
    pub fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    /// Returns the underlying batches.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Returns the number of batches.
    pub fn num_batches(&self) -> usize {
        self.batches.len()
    }
}

/// Options for CSV parsing.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row.
    pub has_header: bool,
    /// Delimiter character (default is comma).
    pub delimiter: Option<u8>,
    /// Batch size for reading.
    pub batch_size: usize,
    /// Optional schema (inferred if not provided).
    pub schema: Option<arrow::datatypes::Schema>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
            batch_size: 8192,
            schema: None,
        }
    }
}

impl CsvOptions {
    /// Creates new CSV options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the file has a header row.
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the delimiter character.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Sets the batch size for reading.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets an explicit schema instead of inferring one.
    #[must_use]
    pub fn with_schema(mut self, schema: arrow::datatypes::Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Options for JSON Lines parsing.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Batch size for reading.
    pub batch_size: usize,
    /// Optional schema (inferred if not provided).
    pub schema: Option<arrow::datatypes::Schema>,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            batch_size: 8192,
            schema: None,
        }
    }
}

impl JsonOptions {
    /// Creates new JSON options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batch size for reading.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets an explicit schema instead of inferring one.
    #[must_use]
    pub fn with_schema(mut self, schema: arrow::datatypes::Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}

#[cfg(test)]
mod tests {
    use arrow::{
        array::{Int32Array, StringArray},
        datatypes::{DataType, Field, Schema},
    };

    use super::*;

    fn sample_batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("name", DataType::Utf8, true),
        ]));

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![1, 2, 3])),
                Arc::new(StringArray::from(vec![Some("a"), None, Some("c")])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_batch() {
        let table = Table::from_batch(sample_batch()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.num_batches(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_new_multiple_batches() {
        let table = Table::new(vec![sample_batch(), sample_batch()]).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.num_batches(), 2);
    }

    #[test]
    fn test_new_empty_vector_rejected() {
        let result = Table::new(vec![]);
        assert!(matches!(result, Err(Error::EmptyTable)));
    }

    #[test]
    fn test_new_schema_mismatch() {
        let other_schema = Arc::new(Schema::new(vec![Field::new(
            "value",
            DataType::Float64,
            true,
        )]));
        let other = RecordBatch::try_new(
            other_schema,
            vec![Arc::new(arrow::array::Float64Array::from(vec![1.0]))],
        )
        .unwrap();

        let result = Table::new(vec![sample_batch(), other]);
        assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn test_empty_table() {
        let schema = Arc::new(Schema::new(vec![Field::new("x", DataType::Int64, true)]));
        let table = Table::empty(schema);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.n_cols(), 1);
    }

    #[test]
    fn test_from_csv_str() {
        let table = Table::from_csv_str("a,b\n1,x\n2,y\n3,\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.n_cols(), 2);
        assert_eq!(table.schema().field(0).name(), "a");
    }

    #[test]
    fn test_from_csv_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data.csv");
        std::fs::write(&path, "id,score\n1,0.5\n2,0.7\n").unwrap();

        let table = Table::from_csv(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.n_cols(), 2);
    }

    #[test]
    fn test_from_csv_missing_file() {
        let result = Table::from_csv("/definitely/not/here.csv");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_from_json_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data.jsonl");
        std::fs::write(&path, "{\"id\": 1, \"name\": \"a\"}\n{\"id\": 2, \"name\": \"b\"}\n")
            .unwrap();

        let table = Table::from_json(&path).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_csv_options_builder() {
        let options = CsvOptions::new()
            .with_header(false)
            .with_delimiter(b';')
            .with_batch_size(128);
        assert!(!options.has_header);
        assert_eq!(options.delimiter, Some(b';'));
        assert_eq!(options.batch_size, 128);
    }
}
