//! Unit tests for marker file import

use std::path::PathBuf;

use poemwalk::storage::config::{AppConfig, CatalogSettings, MarkerSource, SourceKind};
use poemwalk::world::geo::Coordinate;
use poemwalk::world::import::{load_catalog, load_source, ImportError, ImportWarning};
use poemwalk::world::landmarks::{MarkerIcon, MarkerStyle};

const POEMS: &str = "\
id;original_title;dutch_title;author;placement_year;language;latitude;longitude
1;Ozymandias;EMPTY;P.B. Shelley;1997;English;52.1601;4.4890
2;Zonder titel;;Anoniem;;Nederlands;not-a-number;4.4891
";

const LANDMARKS: &str = "\
title;text;latitude;longitude;image;image2;image3;questEnd;newQuestLatitude;newQuestLongitude;panorama
Molen de Valk;Museum mill;52.164610049352;4.48653665761824;valk.jpg;valk2.jpg;;Go to the windmill;52.15896289011223;4.492492679291971;valk_360.jpg
";

fn write(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_poem_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "poems.csv", POEMS);
    let source = MarkerSource {
        path: path.clone(),
        kind: SourceKind::Poem,
        icon: None,
        style: MarkerStyle::Box,
    };

    let result = load_source(&path, &source, b';').unwrap();
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].icon, MarkerIcon::Poem);
    assert_eq!(result.records[0].metadata.author.as_deref(), Some("P.B. Shelley"));
    assert_eq!(result.records[1].coords, Coordinate::new(0.0, 4.4891));
    assert_eq!(result.warnings, vec![ImportWarning::InvalidCoordinates { row: 2 }]);
}

#[test]
fn test_load_catalog_in_source_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "poems.csv", POEMS);
    write(dir.path(), "landmarks.csv", LANDMARKS);

    let config = AppConfig {
        data_dir: dir.path().to_path_buf(),
        catalog: CatalogSettings {
            delimiter: ';',
            sources: vec![
                MarkerSource {
                    path: PathBuf::from("poems.csv"),
                    kind: SourceKind::Poem,
                    icon: None,
                    style: MarkerStyle::Box,
                },
                MarkerSource {
                    path: PathBuf::from("landmarks.csv"),
                    kind: SourceKind::Generic,
                    icon: Some("end_marker_icon".to_string()),
                    style: MarkerStyle::Full,
                },
            ],
        },
        ..Default::default()
    };

    let result = load_catalog(&config).unwrap();
    assert_eq!(result.records.len(), 3);

    let mill = &result.records[2];
    assert_eq!(mill.icon, MarkerIcon::Landmark);
    assert_eq!(mill.style, MarkerStyle::Full);
    assert_eq!(mill.images.len(), 2);
    assert_eq!(mill.panorama.as_deref(), Some("valk_360.jpg"));
    assert_eq!(mill.quest.end.as_deref(), Some("Go to the windmill"));
    assert_eq!(
        mill.quest.relocation,
        Some(Coordinate::new(52.15896289011223, 4.492492679291971))
    );
}

#[test]
fn test_missing_file_is_error_for_single_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    let source = MarkerSource {
        path: path.clone(),
        kind: SourceKind::Generic,
        icon: None,
        style: MarkerStyle::Box,
    };
    assert!(matches!(
        load_source(&path, &source, b';'),
        Err(ImportError::FileNotFound(_))
    ));
}
