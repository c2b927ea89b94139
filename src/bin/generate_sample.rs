use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Normal sample clamped to the unit interval, like Spotify audio features.
    fn unit(&mut self, mean: f64, std_dev: f64) -> f64 {
        self.gauss(mean, std_dev).clamp(0.0, 1.0)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

#[derive(Serialize)]
struct SampleTrack {
    track_id: i64,
    track_name: String,
    artists: String,
    track_genre: String,
    danceability: f64,
    energy: f64,
    valence: f64,
    acousticness: f64,
    liveness: f64,
    speechiness: f64,
    popularity: i64,
    sentiment: String,
}

/// Per-genre feature centres: (danceability, energy, valence, acousticness, speechiness).
const GENRES: [(&str, [f64; 5]); 6] = [
    ("pop", [0.68, 0.65, 0.55, 0.20, 0.07]),
    ("rock", [0.50, 0.80, 0.45, 0.10, 0.05]),
    ("jazz", [0.55, 0.35, 0.50, 0.70, 0.05]),
    ("hip-hop", [0.78, 0.65, 0.50, 0.15, 0.25]),
    ("classical", [0.30, 0.15, 0.30, 0.95, 0.04]),
    ("edm", [0.70, 0.90, 0.40, 0.05, 0.06]),
];

const TRACKS_PER_GENRE: usize = 60;

const WORDS: [&str; 12] = [
    "Midnight", "Neon", "Velvet", "Summer", "Echo", "Golden", "Broken", "Electric", "Quiet",
    "Paper", "Ocean", "Fire",
];
const NOUNS: [&str; 10] = [
    "Dreams", "Heart", "Skyline", "Rain", "Road", "Lights", "Waves", "Garden", "Signal", "Night",
];
const ARTISTS: [&str; 8] = [
    "The Lanterns", "Mira Vale", "Static Bloom", "Oso Grande", "June & the Tides", "K. Orbit",
    "Hollow Pines", "DJ Meridian",
];

fn sentiment_for(valence: f64, rng: &mut SimpleRng) -> &'static str {
    // A few rows carry a label outside the known three.
    if rng.next_f64() < 0.02 {
        return "unknown";
    }
    if valence > 0.6 {
        "positive"
    } else if valence < 0.4 {
        "negative"
    } else {
        "neutral"
    }
}

fn generate(rng: &mut SimpleRng) -> Vec<SampleTrack> {
    let mut tracks = Vec::with_capacity(GENRES.len() * TRACKS_PER_GENRE);
    let mut track_id: i64 = 0;
    for (genre, [dance, energy, valence, acoustic, speech]) in GENRES {
        for _ in 0..TRACKS_PER_GENRE {
            let valence = rng.unit(valence, 0.2);
            let sentiment = sentiment_for(valence, rng);
            tracks.push(SampleTrack {
                track_id,
                track_name: format!("{} {}", rng.pick(&WORDS), rng.pick(&NOUNS)),
                artists: rng.pick(&ARTISTS).to_string(),
                track_genre: genre.to_string(),
                danceability: rng.unit(dance, 0.12),
                energy: rng.unit(energy, 0.15),
                valence,
                acousticness: rng.unit(acoustic, 0.15),
                liveness: rng.unit(0.18, 0.1),
                speechiness: rng.unit(speech, 0.04),
                popularity: rng.gauss(45.0, 20.0).clamp(0.0, 100.0).round() as i64,
                sentiment: sentiment.to_string(),
            });
            track_id += 1;
        }
    }
    tracks
}

fn write_csv(path: &str, tracks: &[SampleTrack]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for t in tracks {
        writer.serialize(t).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, tracks: &[SampleTrack]) -> Result<()> {
    let text = |f: fn(&SampleTrack) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(tracks.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&SampleTrack) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(tracks.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&SampleTrack) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(tracks.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<(&str, DataType, ArrayRef)> = vec![
        ("track_id", DataType::Int64, int(|t| t.track_id)),
        ("track_name", DataType::Utf8, text(|t| t.track_name.as_str())),
        ("artists", DataType::Utf8, text(|t| t.artists.as_str())),
        ("track_genre", DataType::Utf8, text(|t| t.track_genre.as_str())),
        ("danceability", DataType::Float64, float(|t| t.danceability)),
        ("energy", DataType::Float64, float(|t| t.energy)),
        ("valence", DataType::Float64, float(|t| t.valence)),
        ("acousticness", DataType::Float64, float(|t| t.acousticness)),
        ("liveness", DataType::Float64, float(|t| t.liveness)),
        ("speechiness", DataType::Float64, float(|t| t.speechiness)),
        ("popularity", DataType::Int64, int(|t| t.popularity)),
        ("sentiment", DataType::Utf8, text(|t| t.sentiment.as_str())),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, ty, _)| Field::new(*name, ty.clone(), false))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, _, col)| col).collect(),
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let tracks = generate(&mut rng);

    write_csv("sample_tracks.csv", &tracks)?;
    write_parquet("sample_tracks.parquet", &tracks)?;

    println!(
        "Wrote {} tracks across {} genres to sample_tracks.csv and sample_tracks.parquet",
        tracks.len(),
        GENRES.len()
    );
    Ok(())
}
