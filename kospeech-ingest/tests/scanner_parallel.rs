//! Parallel scanning equivalence: any chunking of the line set must accept
//! the same records as a sequential pass.

mod helpers;

use helpers::CorpusFixture;

use kospeech_ingest::codes::AttributeFilter;
use kospeech_ingest::normalize::KoreanG2p;
use kospeech_ingest::scanner;

fn build_fixture() -> CorpusFixture {
    let mut fixture = CorpusFixture::new();
    for i in 0..60 {
        let stem = format!("utt_{i:03}");
        let sex = if i % 2 == 0 { "M" } else { "F" };
        match i % 5 {
            // every fifth utterance lacks its JSON sibling
            0 => fixture.add_partial(&stem, sex, false, true),
            // and every fifth (offset) lacks its transcript
            1 => fixture.add_partial(&stem, sex, true, false),
            _ => fixture.add_utterance(&stem, sex),
        }
    }
    fixture.write_metadata("dialog");
    fixture
}

#[test]
fn parallel_and_sequential_scans_agree() {
    let fixture = build_fixture();
    let filter = AttributeFilter::default();

    let mut sequential_config = fixture.config();
    sequential_config.parallelism = 1;
    let sequential = scanner::scan(&sequential_config, &filter, KoreanG2p::new).unwrap();

    for parallelism in [2, 4, 8, 64] {
        let mut config = fixture.config();
        config.parallelism = parallelism;
        let parallel = scanner::scan(&config, &filter, KoreanG2p::new).unwrap();

        let mut sequential_ids: Vec<&str> = sequential.iter().map(|r| r.id.as_str()).collect();
        let mut parallel_ids: Vec<&str> = parallel.iter().map(|r| r.id.as_str()).collect();
        sequential_ids.sort_unstable();
        parallel_ids.sort_unstable();

        assert_eq!(sequential_ids, parallel_ids, "parallelism {parallelism}");
    }

    // 60 utterances, two of every five missing a sibling
    assert_eq!(sequential.len(), 36);
}

#[test]
fn records_from_multiple_metadata_files_merge() {
    let mut fixture = CorpusFixture::new();
    fixture.add_utterance("room_a", "M");
    fixture.write_metadata("room_a");
    fixture.add_utterance("room_b", "F");
    fixture.write_metadata("room_b");

    let config = fixture.config();
    let records = scanner::scan(&config, &AttributeFilter::default(), KoreanG2p::new).unwrap();

    let mut ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["room_a", "room_b"]);
}
