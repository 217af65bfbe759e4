use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

extern crate bincode;
extern crate quick_xml as xml;
extern crate regex;
extern crate regex_syntax;
extern crate serde;
#[macro_use]
extern crate serde_derive;

use bincode::Options;

#[path = "src/metadata/loader.rs"]
mod loader;

#[path = "src/error.rs"]
mod error;

/// A single `prefix -> description` entry of a geocoding table, one per line
/// of an `assets/geocoding/<lang>/<calling_code>.txt` source file, in the
/// same prefix/tab/description layout as libphonenumber's own geocoder data.
#[derive(Serialize)]
struct GeocodingEntry {
    prefix: String,
    description: String,
}

fn build_metadata_database() {
    let metadata = loader::load(BufReader::new(
        File::open("assets/PhoneNumberMetadata.xml").expect("could not open metadata file"),
    ))
    .expect("failed to load metadata");

    let mut out = BufWriter::new(
        File::create(Path::new(&env::var("OUT_DIR").unwrap()).join("database.bin"))
            .expect("could not create database file"),
    );

    bincode::options()
        .with_varint_encoding()
        .serialize_into(&mut out, &metadata)
        .expect("failed to serialize database");
}

/// Compile every `assets/geocoding/<lang>/<calling_code>.txt` prefix table
/// into a single binary blob keyed by `(lang, calling_code)`, loaded at
/// runtime by the geocoder.
fn build_geocoding_tables() {
    let root = Path::new("assets/geocoding");
    let mut tables: Vec<(String, u16, Vec<GeocodingEntry>)> = Vec::new();

    if root.is_dir() {
        for lang_entry in std::fs::read_dir(root).expect("could not read geocoding directory") {
            let lang_entry = lang_entry.expect("could not read geocoding language directory");
            let lang_path = lang_entry.path();

            if !lang_path.is_dir() {
                continue;
            }

            let lang = lang_path
                .file_name()
                .and_then(|n| n.to_str())
                .expect("non UTF-8 geocoding language directory name")
                .to_owned();

            for file_entry in std::fs::read_dir(&lang_path).expect("could not read language dir") {
                let file_entry = file_entry.expect("could not read geocoding table file");
                let path = file_entry.path();

                if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                    continue;
                }

                let calling_code: u16 = path
                    .file_stem()
                    .and_then(|n| n.to_str())
                    .expect("non UTF-8 geocoding table file name")
                    .parse()
                    .expect("geocoding table file name must be a calling code");

                let mut entries = Vec::new();
                let reader = BufReader::new(File::open(&path).expect("could not open table"));

                for line in reader.lines() {
                    let line = line.expect("could not read geocoding table line");
                    let line = line.trim();

                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }

                    let mut parts = line.splitn(2, '\t');
                    let prefix = parts.next().unwrap_or_default().to_owned();
                    let description = parts.next().unwrap_or_default().to_owned();

                    entries.push(GeocodingEntry { prefix, description });
                }

                entries.sort_by(|a, b| a.prefix.cmp(&b.prefix));
                tables.push((lang.clone(), calling_code, entries));
            }
        }
    }

    let mut out = BufWriter::new(
        File::create(Path::new(&env::var("OUT_DIR").unwrap()).join("geocoding.bin"))
            .expect("could not create geocoding file"),
    );

    bincode::options()
        .with_varint_encoding()
        .serialize_into(&mut out, &tables)
        .expect("failed to serialize geocoding tables");
}

fn main() {
    println!("cargo:rerun-if-changed=assets/PhoneNumberMetadata.xml");
    println!("cargo:rerun-if-changed=assets/geocoding");

    build_metadata_database();
    build_geocoding_tables();
}
