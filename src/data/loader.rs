use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float64Type};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;

use super::model::{Sentiment, Track, TrackDataset, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while reading a track table.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed parquet: {0}")]
    Parquet(#[from] ParquetError),
    #[error("malformed arrow data: {0}")]
    Arrow(#[from] ArrowError),
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("column '{column}' has unsupported type {found}")]
    InvalidColumn { column: String, found: String },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a track table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one track per line (primary format)
/// * `.json`    – `[{ "track_name": ..., "track_genre": ..., ... }, ...]`
/// * `.parquet` – one row per track, numeric columns of any numeric type
pub fn load_file(path: &Path) -> Result<TrackDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv_reader(open(path)?),
        "json" => load_json_reader(open(path)?),
        "parquet" | "pq" => load_parquet(open(path)?),
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    }?;

    log::info!(
        "Loaded {} tracks across {} genres from {}",
        dataset.len(),
        dataset.genres.len(),
        path.display()
    );
    let unknown = dataset.unknown_sentiments();
    if !unknown.is_empty() {
        log::warn!("Sentiment labels without a palette colour: {unknown:?}");
    }
    Ok(dataset)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Report every required column absent from `present`, in required order.
fn check_columns(present: &[&str]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|req| !present.contains(*req))
        .map(|req| req.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, extra columns ignored.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<TrackDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    check_columns(&headers.iter().collect::<Vec<_>>())?;

    let tracks = reader
        .deserialize::<Track>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(TrackDataset::from_tracks(tracks))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "track_name": "Song", "artists": "Band", "track_genre": "pop",
///     "danceability": 0.7, ..., "popularity": 64, "sentiment": "positive" },
///   ...
/// ]
/// ```
pub fn load_json_reader<R: Read>(reader: R) -> Result<TrackDataset> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_reader(std::io::BufReader::new(reader))?;

    // Column check against the first record; later records fail in serde.
    if let Some(first) = rows.first() {
        check_columns(&first.keys().map(String::as_str).collect::<Vec<_>>())?;
    }

    let tracks = rows
        .into_iter()
        .map(|row| serde_json::from_value::<Track>(serde_json::Value::Object(row)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(TrackDataset::from_tracks(tracks))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet table.
///
/// Text columns may be Utf8, LargeUtf8, Utf8View or dictionary-encoded
/// strings. Numeric columns may be any integer or float type and are cast
/// to f64. Works with files written by both **Pandas** (`df.to_parquet()`,
/// including `category` columns) and **Polars** (`df.write_parquet()`).
fn load_parquet(file: std::fs::File) -> Result<TrackDataset> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let names: Vec<&str> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    check_columns(&names)?;
    let reader = builder.build()?;

    let mut tracks = Vec::new();
    for batch in reader {
        append_batch(&batch?, &mut tracks)?;
    }

    Ok(TrackDataset::from_tracks(tracks))
}

fn append_batch(batch: &RecordBatch, tracks: &mut Vec<Track>) -> Result<()> {
    let track_name = text_column(batch, "track_name")?;
    let artists = text_column(batch, "artists")?;
    let genre = text_column(batch, "track_genre")?;
    let sentiment = text_column(batch, "sentiment")?;
    let danceability = float_column(batch, "danceability")?;
    let energy = float_column(batch, "energy")?;
    let valence = float_column(batch, "valence")?;
    let acousticness = float_column(batch, "acousticness")?;
    let liveness = float_column(batch, "liveness")?;
    let speechiness = float_column(batch, "speechiness")?;
    let popularity = float_column(batch, "popularity")?;

    tracks.reserve(batch.num_rows());
    for row in 0..batch.num_rows() {
        tracks.push(Track {
            track_name: track_name[row].clone(),
            artists: artists[row].clone(),
            genre: genre[row].clone(),
            danceability: danceability[row],
            energy: energy[row],
            valence: valence[row],
            acousticness: acousticness[row],
            liveness: liveness[row],
            speechiness: speechiness[row],
            popularity: popularity[row],
            sentiment: Sentiment::parse(&sentiment[row]),
        });
    }
    Ok(())
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumns(vec![name.to_string()]))
}

/// Read a string column; nulls become empty strings.
///
/// Dictionary-encoded strings (pandas `category`) and `Utf8View` are cast
/// to plain Utf8 first.
fn text_column(batch: &RecordBatch, name: &str) -> Result<Vec<String>> {
    let col = column(batch, name)?;
    let strings = |arr: &dyn Array| -> Vec<String> {
        arr.as_string::<i32>()
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect()
    };
    let values = match col.data_type() {
        DataType::Utf8 => strings(col.as_ref()),
        DataType::LargeUtf8 => col
            .as_string::<i64>()
            .iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect(),
        DataType::Utf8View => strings(arrow::compute::cast(col, &DataType::Utf8)?.as_ref()),
        DataType::Dictionary(_, value) if is_text(value) => {
            strings(arrow::compute::cast(col, &DataType::Utf8)?.as_ref())
        }
        other => {
            return Err(LoadError::InvalidColumn {
                column: name.to_string(),
                found: format!("{other:?}"),
            })
        }
    };
    Ok(values)
}

fn is_text(ty: &DataType) -> bool {
    matches!(ty, DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View)
}

/// Read a numeric column as f64; nulls become NaN.
fn float_column(batch: &RecordBatch, name: &str) -> Result<Vec<f64>> {
    let col = column(batch, name)?;
    if !col.data_type().is_numeric() {
        return Err(LoadError::InvalidColumn {
            column: name.to_string(),
            found: format!("{:?}", col.data_type()),
        });
    }
    let cast = arrow::compute::cast(col, &DataType::Float64)?;
    let floats = cast.as_primitive::<Float64Type>();
    Ok((0..floats.len())
        .map(|i| if floats.is_null(i) { f64::NAN } else { floats.value(i) })
        .collect())
}
