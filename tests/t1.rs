use anyhow::Result;
use ednrw::settings::HASH_SETTINGS;
use ednrw::{decode_all, encode};

const INPUT: &str = include_str!("t-input.edn");
const EXPECTED: &str = include_str!("t-expected.edn");

#[test]
fn t1() -> Result<()> {
    let vals = decode_all(INPUT, &HASH_SETTINGS)?;
    let mut out = String::new();
    for v in &vals {
        out.push_str(&encode(v)?);
        out.push('\n');
    }
    assert_eq!(out, EXPECTED);
    Ok(())
}
