//! Offline dataset jobs: cleaning, balancing, training-table features.

use std::io::Cursor;
use urlsentry::batch::{
    self, clean, sample_per_label, BatchFeatureBuilder, DomainParts, Table, DERIVED_COLUMNS,
};
use urlsentry::config::BatchConfig;
use urlsentry::Error;

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table {
        headers: headers.iter().map(|s| s.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
    }
}

fn labelled(counts: &[(&str, usize)]) -> Table {
    let mut t = Table::new(vec!["url".into(), "type".into()]);
    for (label, n) in counts {
        for i in 0..*n {
            t.rows
                .push(vec![format!("http://{label}.example/{i}"), label.to_string()]);
        }
    }
    t
}

#[test]
fn sampling_caps_large_groups_and_keeps_small_ones() {
    let t = labelled(&[("a", 30_000), ("b", 500)]);
    let out = sample_per_label(&t, "type", 20_000, 42).unwrap();
    let counts = out.value_counts(1);
    assert_eq!(counts, vec![("a".to_string(), 20_000), ("b".to_string(), 500)]);
}

#[test]
fn sampling_is_reproducible_for_a_seed() {
    let t = labelled(&[("a", 3_000), ("b", 50)]);
    let first = sample_per_label(&t, "type", 1_000, 7).unwrap();
    let second = sample_per_label(&t, "type", 1_000, 7).unwrap();
    assert_eq!(first, second);

    let other = sample_per_label(&t, "type", 1_000, 8).unwrap();
    assert_ne!(first.rows, other.rows);
}

#[test]
fn sampling_groups_on_normalized_labels() {
    let t = table(
        &["url", "type"],
        &[
            &["http://a/1", " Benign"],
            &["http://a/2", "benign "],
            &["http://a/3", "MALICIOUS"],
            &["http://a/4", "  "],
        ],
    );
    let out = sample_per_label(&t, "type", 10, 42).unwrap();
    assert_eq!(
        out.value_counts(1),
        vec![("benign".to_string(), 2), ("malicious".to_string(), 1)]
    );
}

#[test]
fn sampling_requires_label_column() {
    let t = table(&["url"], &[&["http://a"]]);
    let err = sample_per_label(&t, "type", 10, 42).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(c) if c == "type"));
}

#[test]
fn cleaning_dedups_and_normalizes() {
    let t = table(
        &["url", "type", "source"],
        &[
            &["http://x.com/a", "benign", "s1"],
            &[" http://x.com/a ", " Benign ", "s2"],
            &["http://x.com/b", "", "s3"],
            &["", "malicious", "s4"],
            &["http://x.com/a", "malicious", "s5"],
        ],
    );
    let out = clean(&t).unwrap();
    assert_eq!(
        out.rows,
        vec![
            vec!["http://x.com/a", "benign", "s1"],
            vec!["http://x.com/a", "malicious", "s5"],
        ]
    );
}

#[test]
fn cleaning_fails_fast_without_required_columns() {
    let t = table(&["link", "type"], &[&["http://x", "benign"]]);
    assert!(matches!(clean(&t), Err(Error::MissingColumn(c)) if c == "url"));

    let t = table(&["url", "label"], &[&["http://x", "benign"]]);
    assert!(matches!(clean(&t), Err(Error::MissingColumn(c)) if c == "type"));
}

#[test]
fn batch_features_for_ip_host() {
    let builder = BatchFeatureBuilder::default();
    let f = builder.features("http://192.168.0.1:8080/secure/login.php?id=7");
    assert_eq!(f.host, "192.168.0.1");
    assert_eq!(f.path, "/secure/login.php");
    assert!(f.has_ip);
    assert_eq!(f.ip_length, 11);
    assert_eq!(f.num_dots, 4);
    assert_eq!(f.num_slashes, 4);
    assert_eq!(f.num_digits, 13);
    assert_eq!(f.url_length, f.num_digits + f.num_letters + f.num_special);
    // login + secure
    assert_eq!(f.suspicious_word_count, 2);
}

#[test]
fn batch_features_for_plain_domain() {
    let builder = BatchFeatureBuilder::default();
    let f = builder.features("https://www.shop.example.com/free-prize");
    assert_eq!(f.host, "www.shop.example.com");
    assert!(!f.has_ip);
    assert_eq!(f.ip_length, 0);
    assert_eq!(f.num_hyphens, 1);
    assert_eq!(f.parts.domain, "example");
    assert_eq!(f.parts.suffix, "com");
    assert_eq!(f.parts.subdomain, "www.shop");
    assert_eq!(f.num_subdomains, 2);
    // free + prize
    assert_eq!(f.suspicious_word_count, 2);
}

#[test]
fn batch_features_degrade_on_malformed_url() {
    let builder = BatchFeatureBuilder::default();
    let f = builder.features("http://[oops/login");
    assert_eq!(f.host, "");
    assert_eq!(f.path, "");
    assert_eq!(f.url_length, 18);
    assert_eq!(f.parts, DomainParts::default());
    assert!(!f.has_ip);
    assert_eq!(f.suspicious_word_count, 1);
}

fn triple(p: &DomainParts) -> (&str, &str, &str) {
    (p.subdomain.as_str(), p.domain.as_str(), p.suffix.as_str())
}

#[test]
fn domain_parts_for_schemeless_rows() {
    let builder = BatchFeatureBuilder::default();

    let p = builder.domain_parts("mp3raid.com/music/krizz_kaliko.html");
    assert_eq!(triple(&p), ("", "mp3raid", "com"));
    assert_eq!(p.subdomain_count(), 0);

    let p = builder.domain_parts("www.google.com:8080/a");
    assert_eq!(triple(&p), ("www", "google", "com"));

    let p = builder.domain_parts("admin@login.example.org?next=/home");
    assert_eq!(triple(&p), ("login", "example", "org"));
}

#[test]
fn domain_parts_with_scheme() {
    let builder = BatchFeatureBuilder::default();

    let p = builder.domain_parts("http://example.co.uk/x");
    assert_eq!((p.domain.as_str(), p.suffix.as_str()), ("example", "co.uk"));
    assert_eq!(p.subdomain_count(), 0);

    let p = builder.domain_parts("https://user:pw@a.b.example.com:8443/");
    assert_eq!(triple(&p), ("a.b", "example", "com"));
    assert_eq!(p.subdomain_count(), 2);
}

#[test]
fn domain_parts_empty_without_host() {
    let builder = BatchFeatureBuilder::default();
    assert_eq!(builder.domain_parts(""), DomainParts::default());
    assert_eq!(builder.domain_parts("/relative/path"), DomainParts::default());
    assert_eq!(builder.domain_parts("http://[oops/login"), DomainParts::default());
}

#[test]
fn batch_host_column_cuts_at_first_colon() {
    let builder = BatchFeatureBuilder::default();
    let f = builder.features("http://user:pw@a.example.com:8080/");
    // training column keeps the raw netloc head; the suffix split sees the real host
    assert_eq!(f.host, "user");
    assert_eq!(f.hostname_length, 4);
    assert_eq!(f.parts.domain, "example");
    assert_eq!(f.num_subdomains, 1);
}

#[test]
fn batch_digit_count_is_unicode_aware() {
    let builder = BatchFeatureBuilder::default();

    // Arabic-Indic three
    let f = builder.features("http://x.com/a\u{663}");
    assert_eq!(f.url_length, 15);
    assert_eq!(f.num_digits, 1);
    assert_eq!(f.num_letters, 9);
    assert_eq!(f.num_special, 5);

    // Roman numeral twelve is numeric, not a letter
    let f = builder.features("http://x.com/\u{216b}");
    assert_eq!(f.url_length, 14);
    assert_eq!(f.num_digits, 1);
    assert_eq!(f.num_letters, 8);
    assert_eq!(f.num_special, 5);
}

#[test]
fn builders_agree_on_ip_hosts() {
    let builders: Vec<_> = (0..4).map(|_| BatchFeatureBuilder::default()).collect();
    for b in &builders {
        assert!(b.is_ip("10.0.0.1"));
        assert!(!b.is_ip("10.0.0.1.example"));
        assert!(!b.is_ip(""));
    }
}

#[test]
fn batch_keywords_differ_from_online_keywords() {
    let builder = BatchFeatureBuilder::default();
    // paypal is only on the online list, prize only on the batch list
    assert_eq!(builder.suspicious_word_count("http://paypal.example"), 0);
    assert_eq!(builder.suspicious_word_count("http://prize.example"), 1);
}

#[test]
fn enrich_preserves_columns_and_appends_features() {
    let t = table(
        &["url", "type", "extra"],
        &[&["http://a.com/x", "benign", "keep-me"]],
    );
    let out = BatchFeatureBuilder::default().enrich(&t).unwrap();
    assert_eq!(out.headers.len(), 3 + DERIVED_COLUMNS.len());
    assert_eq!(&out.headers[..3], &["url", "type", "extra"]);
    assert_eq!(out.headers[3], "url_length");
    assert_eq!(out.headers.last().map(String::as_str), Some("has_suspicious_word"));

    let row = &out.rows[0];
    assert_eq!(row[2], "keep-me");
    assert_eq!(row[out.column("url_length").unwrap()], "14");
    assert_eq!(row[out.column("host").unwrap()], "a.com");
    assert_eq!(row[out.column("has_ip").unwrap()], "0");
}

#[test]
fn csv_round_trip_keeps_quoted_cells() {
    let csv = "url,type\n\"http://a.com/?q=1,2\",benign\nhttp://b.com,malicious,extra\nhttp://c.com\n";
    let t = Table::from_reader(Cursor::new(csv)).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(t.rows[0][0], "http://a.com/?q=1,2");
    assert_eq!(t.rows[1], vec!["http://b.com", "malicious"]);
    assert_eq!(t.rows[2], vec!["http://c.com", ""]);

    let mut buf = Vec::new();
    t.to_writer(&mut buf).unwrap();
    let back = Table::from_reader(Cursor::new(buf)).unwrap();
    assert_eq!(back, t);
}

#[test]
fn run_build_writes_feature_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("balanced.csv");
    let output = dir.path().join("features.csv");
    std::fs::write(
        &input,
        "url,type\nhttp://a.com/login,Malicious\nhttp://a.com/login,malicious\nhttp://b.org,benign\n",
    )
    .unwrap();

    let written = batch::run_build(&input, &output, &BatchConfig::default()).unwrap();
    assert_eq!(written.len(), 2);

    let reread = Table::read_csv(&output).unwrap();
    assert_eq!(reread, written);
    let col = reread.column("suspicious_word_count").unwrap();
    assert_eq!(reread.rows[0][col], "1");
}

#[test]
fn run_sample_writes_balanced_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    let output = dir.path().join("balanced.csv");
    let mut raw = String::from("url,type\n");
    for i in 0..30 {
        raw.push_str(&format!("http://bad{i}.example,Malicious\n"));
    }
    for i in 0..5 {
        raw.push_str(&format!("http://ok{i}.example,benign\n"));
    }
    std::fs::write(&input, raw).unwrap();

    let out = batch::run_sample(&input, &output, 10, 42).unwrap();
    assert_eq!(
        out.value_counts(1),
        vec![("benign".to_string(), 5), ("malicious".to_string(), 10)]
    );
    assert_eq!(Table::read_csv(&output).unwrap(), out);
}

#[test]
fn run_build_fails_on_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    std::fs::write(&input, "link,label\nhttp://a.com,benign\n").unwrap();
    let err = batch::run_build(&input, &dir.path().join("out.csv"), &BatchConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::MissingColumn(_)));
}
