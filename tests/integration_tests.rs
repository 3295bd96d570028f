use std::{fs, io, path::Path};

use hex_literal::hex;
use sha2::{Digest, Sha256};
// cargo run --bin asisite -- filter -i tests/data/sample_raw.bed -o filtered.bed
// cargo run --bin asisite -- intersect -s filtered.bed -a tests/data/asisi_sites.bed -t 2000 -o sample.bed
use asisite::{
    io::bed::{self, SiteRate},
    region::{ContigPolicy, GenomicInterval},
    run, run_combine, run_filter,
};

const TEST_DATA_DIR: &str = "./tests/data/";
const SITES_FILE: &str = "asisi_sites.bed";
const RAW_SAMPLE_FILE: &str = "sample_raw.bed";
const TOTAL_COUNT: i64 = 2000;

fn sha256_file_digest<P: AsRef<Path>>(path: P) -> Vec<u8> {
    let mut file = fs::File::open(&path).expect(&format!("Failed to open file: {}", path.as_ref().display()));
    let mut hasher = Sha256::new();
    _ = io::copy(&mut file, &mut hasher).expect(&format!("Failed to read from file: {}", path.as_ref().display()));
    hasher.finalize().to_vec()
}

fn sites_path() -> String {
    format!("{TEST_DATA_DIR}/{SITES_FILE}")
}

/// Filter the raw sample into `dir` and return the path of the filtered file.
fn filtered_sample(dir: &Path) -> String {
    let filtered = dir.join("filtered.bed");
    let kept = run_filter(
        &format!("{TEST_DATA_DIR}/{RAW_SAMPLE_FILE}"),
        filtered.to_str().unwrap(),
        30,
        4,
    )
    .unwrap();
    assert_eq!(7, kept);
    filtered.to_str().unwrap().to_string()
}

fn intersect_to_string(sample: &str, policy: ContigPolicy, index_sites: bool) -> String {
    let rates = run(sample, &sites_path(), TOTAL_COUNT, policy, index_sites).unwrap();
    let mut out = Vec::new();
    bed::write_site_rates(&mut out, &rates).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
/// Check the input files used for integration tests.
/// If this test fails, it means one or more of the input files have changed.
/// This is a problem if tests are not updated to reflect the new input files.
fn check_input_files() {
    let path = Path::new(TEST_DATA_DIR).join(SITES_FILE);
    let expect = hex!("f51dad0b53027d36053e3cb71752620921f70f8d43c1a81a7f504e9049612ccf");
    assert_eq!(sha256_file_digest(path)[..], expect[..]);

    let path = Path::new(TEST_DATA_DIR).join(RAW_SAMPLE_FILE);
    let expect = hex!("9f02432adba0c07ba990a8261dee4dd904133bc38fdeeaa4996a6d94a7582842");
    assert_eq!(sha256_file_digest(path)[..], expect[..]);
}

#[test]
fn filter_drops_low_quality_records() {
    let dir = tempfile::tempdir().unwrap();
    let filtered = filtered_sample(dir.path());
    let contents = fs::read_to_string(filtered).unwrap();
    assert!(!contents.contains("\tr4\t"));
    assert_eq!(7, contents.lines().count());
}

#[test]
fn sites_on_same_contig() {
    let dir = tempfile::tempdir().unwrap();
    let sample = filtered_sample(dir.path());
    assert_eq!(
        "chr1\t100\t200\t1.0\nchr1\t150\t300\t0.5\nchr2\t1000\t1100\t0.5\n",
        intersect_to_string(&sample, ContigPolicy::SameContig, false)
    );
}

#[test]
fn sites_on_any_contig() {
    // chr2:120-130 lands in chr1:100-200 when contigs are not compared
    let dir = tempfile::tempdir().unwrap();
    let sample = filtered_sample(dir.path());
    assert_eq!(
        "chr1\t100\t200\t1.5\nchr1\t150\t300\t0.5\nchr2\t1000\t1100\t0.5\n",
        intersect_to_string(&sample, ContigPolicy::IgnoreContig, false)
    );
}

#[test]
fn site_index_gives_same_output() {
    let dir = tempfile::tempdir().unwrap();
    let sample = filtered_sample(dir.path());
    for policy in [ContigPolicy::SameContig, ContigPolicy::IgnoreContig] {
        assert_eq!(
            intersect_to_string(&sample, policy, false),
            intersect_to_string(&sample, policy, true)
        );
    }
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let sample = filtered_sample(dir.path());
    let first = dir.path().join("first.bed");
    let second = dir.path().join("second.bed");

    for out in [&first, &second] {
        let rates = run(&sample, &sites_path(), TOTAL_COUNT, ContigPolicy::SameContig, false).unwrap();
        bed::write_site_rates_to_path(out, &rates).unwrap();
    }
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    assert_eq!(sha256_file_digest(&first), sha256_file_digest(&second));
}

#[test]
fn output_parses_back_to_sites() {
    let dir = tempfile::tempdir().unwrap();
    let sample = filtered_sample(dir.path());
    let out = dir.path().join("rates.bed");
    let rates = run(&sample, &sites_path(), TOTAL_COUNT, ContigPolicy::SameContig, false).unwrap();
    bed::write_site_rates_to_path(&out, &rates).unwrap();

    let sites = bed::read_regions(&out).unwrap();
    assert_eq!(rates.keys().cloned().collect::<Vec<GenomicInterval>>(), sites);
    // chr3:50-60 had no hits
    assert!(!sites.contains(&GenomicInterval::new("chr3", 50, 60)));
}

#[test]
fn raw_records_with_extra_columns() {
    // extra columns of the raw records are ignored by the region parser
    let sample = format!("{TEST_DATA_DIR}/{RAW_SAMPLE_FILE}");
    let rates = run(&sample, &sites_path(), 1000, ContigPolicy::SameContig, false).unwrap();
    assert_eq!(Some(&3.0), rates.get(&GenomicInterval::new("chr1", 100, 200)));
}

#[test]
fn combine_samples() {
    let dir = tempfile::tempdir().unwrap();
    let sample = filtered_sample(dir.path());
    let same = dir.path().join("same.bed");
    let any = dir.path().join("any.bed");
    bed::write_site_rates_to_path(
        &same,
        &run(&sample, &sites_path(), TOTAL_COUNT, ContigPolicy::SameContig, false).unwrap(),
    )
    .unwrap();
    bed::write_site_rates_to_path(
        &any,
        &run(&sample, &sites_path(), TOTAL_COUNT, ContigPolicy::IgnoreContig, false).unwrap(),
    )
    .unwrap();

    let inputs = vec![
        ("same".to_string(), same.to_str().unwrap().to_string()),
        ("any".to_string(), any.to_str().unwrap().to_string()),
    ];
    let (rows, summary) = run_combine(&inputs).unwrap();
    assert_eq!(6, rows.len());
    assert_eq!("any", rows[3].sample_id);
    assert_eq!(
        bed::read_site_rates(&same).unwrap()[0],
        SiteRate {
            chrom: "chr1".into(),
            start: 100,
            end: 200,
            count: 1.0
        }
    );

    // counts: 1.0, 0.5, 0.5, 1.5, 0.5, 0.5
    assert_eq!(6, summary.n);
    assert!((summary.mean.unwrap() - 4.5 / 6.0).abs() < 1e-12);
    assert_eq!(Some(1.5), summary.max);
    assert_eq!(vec!["same".to_string(), "any".to_string()], summary.samples);
}
