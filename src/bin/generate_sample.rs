use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

const TITLES: usize = 400;

const COUNTRIES: &[&str] = &[
    "United States", "India", "United Kingdom", "Japan", "South Korea", "Canada", "Spain",
    "France", "Mexico", "Egypt", "Nigeria", "Unknown",
];
const GENRES: &[&str] = &[
    "Dramas", "Comedies", "Documentaries", "Action & Adventure", "International Movies",
    "Independent Movies", "Thrillers", "Romantic Movies", "Horror Movies", "Children & Family Movies",
    "Stand-Up Comedy", "Music & Musicals",
];
const SHOW_GENRES: &[&str] = &[
    "International TV Shows", "TV Dramas", "TV Comedies", "Crime TV Shows", "Kids' TV",
    "Docuseries", "Reality TV", "Anime Series", "British TV Shows",
];
const RATINGS: &[&str] = &["TV-MA", "TV-14", "TV-PG", "R", "PG-13", "PG", "TV-Y7", "TV-G", "NR"];
const DIRECTORS: &[&str] = &[
    "Rajiv Chilaka", "Jan Suter", "Raúl Campos", "Suhas Kadav", "Marcus Raboy", "Jay Karas",
    "Cathy Garcia-Molina", "Youssef Chahine", "Martin Scorsese", "Jay Chapman",
];
const WORDS: &[&str] = &[
    "The", "Last", "Night", "City", "Of", "Dreams", "Lost", "Kingdom", "Blue", "River", "Secret",
    "Summer", "Road", "Home",
];
const MONTHS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
#[command(about = "Write a deterministic synthetic catalog as Parquet and CSV")]
struct Args {
    /// Directory receiving sample_catalog.parquet and sample_catalog.csv
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// Up to `max` distinct entries joined with ", ".
    fn pick_list(&mut self, items: &[&str], max: usize) -> String {
        let n = 1 + self.below(max);
        let mut chosen: Vec<&str> = Vec::with_capacity(n);
        for _ in 0..n {
            let item = self.pick(items);
            if !chosen.contains(&item) {
                chosen.push(item);
            }
        }
        chosen.join(", ")
    }

    fn chance(&mut self, percent: usize) -> bool {
        self.below(100) < percent
    }
}

#[derive(Default)]
struct Columns {
    title: Vec<String>,
    kind: Vec<&'static str>,
    director: Vec<Option<String>>,
    country: Vec<Option<String>>,
    date_added: Vec<Option<String>>,
    release_year: Vec<i64>,
    rating: Vec<Option<String>>,
    duration: Vec<Option<String>>,
    listed_in: Vec<String>,
}

fn generate(rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns::default();

    for _ in 0..TITLES {
        let is_movie = rng.chance(70);
        let n_words = 1 + rng.below(5);
        let title: Vec<&str> = (0..n_words).map(|_| rng.pick(WORDS)).collect();
        let release_year = 1980 + rng.below(42) as i64;

        let date_added = if rng.chance(3) {
            Some("sometime soon".to_string())
        } else if rng.chance(2) {
            None
        } else {
            let year = (release_year + rng.below(6) as i64).clamp(2008, 2021);
            let pad = if rng.chance(10) { " " } else { "" };
            Some(format!("{pad}{} {}, {year}", rng.pick(MONTHS), 1 + rng.below(28)))
        };

        let duration = if rng.chance(2) {
            None
        } else if is_movie {
            Some(format!("{} min", 60 + rng.below(120)))
        } else {
            let seasons = 1 + rng.below(6);
            Some(if seasons == 1 {
                "1 Season".to_string()
            } else {
                format!("{seasons} Seasons")
            })
        };

        cols.title.push(title.join(" "));
        cols.kind.push(if is_movie { "Movie" } else { "TV Show" });
        cols.director.push(if is_movie && rng.chance(80) {
            Some(rng.pick_list(DIRECTORS, 2))
        } else {
            None
        });
        cols.country.push(if rng.chance(90) {
            Some(rng.pick_list(COUNTRIES, 3))
        } else {
            None
        });
        cols.date_added.push(date_added);
        cols.release_year.push(release_year);
        cols.rating.push(if rng.chance(97) {
            Some(rng.pick(RATINGS).to_string())
        } else {
            None
        });
        cols.duration.push(duration);
        let genres = if is_movie { GENRES } else { SHOW_GENRES };
        cols.listed_in.push(rng.pick_list(genres, 3));
    }
    cols
}

fn write_parquet(cols: &Columns, path: &Path) -> Result<()> {
    let text = |v: &[Option<String>]| StringArray::from(v.to_vec());

    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("director", DataType::Utf8, true),
        Field::new("country", DataType::Utf8, true),
        Field::new("date_added", DataType::Utf8, true),
        Field::new("release_year", DataType::Int64, false),
        Field::new("rating", DataType::Utf8, true),
        Field::new("duration", DataType::Utf8, true),
        Field::new("listed_in", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(cols.title.clone())),
            Arc::new(StringArray::from(cols.kind.clone())),
            Arc::new(text(&cols.director)),
            Arc::new(text(&cols.country)),
            Arc::new(text(&cols.date_added)),
            Arc::new(Int64Array::from(cols.release_year.clone())),
            Arc::new(text(&cols.rating)),
            Arc::new(text(&cols.duration)),
            Arc::new(StringArray::from(cols.listed_in.clone())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_csv(cols: &Columns, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    writer.write_record([
        "title", "type", "director", "country", "date_added", "release_year", "rating",
        "duration", "listed_in",
    ])?;
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    for i in 0..cols.title.len() {
        writer.write_record([
            cols.title[i].clone(),
            cols.kind[i].to_string(),
            opt(&cols.director[i]),
            opt(&cols.country[i]),
            opt(&cols.date_added[i]),
            cols.release_year[i].to_string(),
            opt(&cols.rating[i]),
            opt(&cols.duration[i]),
            cols.listed_in[i].clone(),
        ])?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let Args { out_dir, seed } = Args::parse();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(seed);
    let cols = generate(&mut rng);

    let parquet_path = out_dir.join("sample_catalog.parquet");
    let csv_path = out_dir.join("sample_catalog.csv");
    write_parquet(&cols, &parquet_path)?;
    write_csv(&cols, &csv_path)?;

    log::info!(
        "Wrote {} titles to {} and {}",
        cols.title.len(),
        parquet_path.display(),
        csv_path.display()
    );
    Ok(())
}
