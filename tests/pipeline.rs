//! Integration tests: extract → merge → ID3 write-back → organize, over a
//! temp directory and real files. The page fetch is exercised with local
//! HTML; no network involved.

use scraper::Html;
use std::fs::File;
use std::path::Path;
use tempfile::tempdir;

use tagfetch::config::{Field, SelectorRule, TagfetchConfig};
use tagfetch::extract::extract;
use tagfetch::organize;
use tagfetch::tags::{self, MetadataRecord};

fn rules() -> Vec<SelectorRule> {
    let rule = |field, selector: &str, multi| SelectorRule {
        field,
        selector: selector.to_string(),
        multi,
    };
    vec![
        rule(Field::Title, "h1", false),
        rule(Field::Album, "h1", false),
        rule(Field::Artist, "div.series", false),
        rule(Field::Artist, "div.credits a:nth-of-type(1)", true),
        rule(Field::Composer, "div.credits a:nth-of-type(2)", true),
        rule(Field::Comment, "#title-description", false),
    ]
}

const PAGE: &str = r#"
<html><body>
  <h1> Ep 1 </h1>
  <div class="series">Studio X</div>
  <div class="credits"></div>
  <p id="title-description">A fine   episode.</p>
</body></html>
"#;

#[test]
fn tag_and_file_one_audio_file() {
    let work = tempdir().unwrap();
    let src = work.path().join("MyShow - http___site.example_ep1.mp3");
    File::create(&src).unwrap();

    let html = Html::parse_document(PAGE);
    let extraction = extract(&html, &rules()).unwrap();
    assert_eq!(extraction[0].as_deref(), Some("Ep 1"));
    assert_eq!(extraction[3], None, "empty credits yield nothing");

    let mut record = MetadataRecord::load(&src);
    assert_eq!(record, MetadataRecord::default(), "fresh file has no tags");

    let changed = tags::merge(
        &mut record,
        &extraction,
        &rules(),
        "MyShow - http___site.example_ep1",
    );
    assert!(!changed.is_empty());
    assert_eq!(record.title.as_deref(), Some("Ep 1"));
    assert_eq!(record.album.as_deref(), Some("Ep 1"));
    assert_eq!(record.artist.as_deref(), Some("Studio X"));
    assert_eq!(record.composer, None);
    assert_eq!(record.comment.as_deref(), Some("A fine episode."));

    record.save(&src).unwrap();

    let dest_root = work.path().join("tagged_albums");
    let dest = organize::place(&src, &dest_root, record.album.as_deref().unwrap()).unwrap();
    assert_eq!(
        dest,
        dest_root
            .join("Ep 1")
            .join("MyShow - http___site.example_ep1.mp3")
    );
    assert!(!src.exists());

    // The written container reads back with the merged fields.
    let reloaded = MetadataRecord::load(&dest);
    assert_eq!(reloaded.title.as_deref(), Some("Ep 1"));
    assert_eq!(reloaded.album.as_deref(), Some("Ep 1"));
    assert_eq!(reloaded.artist.as_deref(), Some("Studio X"));
    assert_eq!(reloaded.composer, None);
    assert_eq!(reloaded.comment.as_deref(), Some("A fine episode."));
}

#[test]
fn rerun_after_write_back_changes_nothing() {
    let work = tempdir().unwrap();
    let src = work.path().join("track.mp3");
    File::create(&src).unwrap();

    let html = Html::parse_document(PAGE);
    let extraction = extract(&html, &rules()).unwrap();

    let mut record = MetadataRecord::load(&src);
    let first = tags::merge(&mut record, &extraction, &rules(), "track");
    assert!(!first.is_empty());
    record.save(&src).unwrap();

    // Second run over the now-tagged file: every field is already set, so
    // the change set is empty and no write is needed.
    let mut rerun = MetadataRecord::load(&src);
    let second = tags::merge(&mut rerun, &extraction, &rules(), "track");
    assert!(second.is_empty(), "re-run must be a no-op, got {second:?}");
}

#[test]
fn existing_tags_survive_the_pipeline() {
    let work = tempdir().unwrap();
    let src = work.path().join("pre_tagged.mp3");
    File::create(&src).unwrap();

    let mut pre = MetadataRecord {
        title: Some("Hand Tagged".to_string()),
        ..Default::default()
    };
    pre.save(&src).unwrap();

    let html = Html::parse_document(PAGE);
    let extraction = extract(&html, &rules()).unwrap();
    let mut record = MetadataRecord::load(&src);
    tags::merge(&mut record, &extraction, &rules(), "pre_tagged");
    record.save(&src).unwrap();

    let reloaded = MetadataRecord::load(&src);
    assert_eq!(reloaded.title.as_deref(), Some("Hand Tagged"));
    assert_eq!(reloaded.album.as_deref(), Some("Ep 1"));
}

#[test]
fn same_album_collisions_get_numbered() {
    let work = tempdir().unwrap();
    let dest_root = work.path().join("tagged_albums");

    let mut placed = Vec::new();
    for dir in ["a", "b"] {
        let sub = work.path().join(dir);
        std::fs::create_dir(&sub).unwrap();
        let src = sub.join("same_name.mp3");
        File::create(&src).unwrap();
        placed.push(organize::place(&src, &dest_root, "One Album").unwrap());
    }

    assert_eq!(placed[0], dest_root.join("One Album").join("same_name.mp3"));
    assert_eq!(
        placed[1],
        dest_root.join("One Album").join("same_name_1.mp3")
    );
    assert!(placed.iter().all(|p| p.exists()));
}

#[test]
fn unknown_album_fallback_groups_files() {
    let work = tempdir().unwrap();
    let src = work.path().join("bare.mp3");
    File::create(&src).unwrap();

    // Page with none of the selectors present.
    let html = Html::parse_document("<html><body><p>irrelevant</p></body></html>");
    let extraction = extract(&html, &rules()).unwrap();
    assert!(extraction.iter().all(Option::is_none));

    let mut record = MetadataRecord::load(&src);
    let changed = tags::merge(&mut record, &extraction, &rules(), "bare");
    assert_eq!(changed, vec![Field::Title, Field::Album]);
    assert_eq!(record.title.as_deref(), Some("bare"));
    assert_eq!(record.album.as_deref(), Some(tags::UNKNOWN_ALBUM));
    record.save(&src).unwrap();

    let dest_root = work.path().join("tagged_albums");
    let dest = organize::place(&src, &dest_root, record.album.as_deref().unwrap()).unwrap();
    assert_eq!(dest, dest_root.join("Unknown Album").join("bare.mp3"));
}

#[test]
fn default_config_selector_table_parses() {
    // Every default selector must be a valid CSS selector; a broken table
    // would fail every file at extraction time.
    let cfg = TagfetchConfig::default();
    for rule in &cfg.selectors {
        assert!(
            scraper::Selector::parse(&rule.selector).is_ok(),
            "default selector failed to parse: {}",
            rule.selector
        );
    }
}
