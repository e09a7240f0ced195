use std::fs;

use anyhow::Result;
use tabson::validate;

#[test]
fn well_formed_array_passes() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("ok.json");
    fs::write(&path, "[\n  {\"tconst\": \"tt1\", \"startYear\": null}\n]")?;
    assert!(validate(&path));
    Ok(())
}

#[test]
fn truncated_array_fails() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("cut.json");
    fs::write(&path, "[\n  {\"tconst\": \"tt1\"},\n  {\"tcon")?;
    assert!(!validate(&path));
    Ok(())
}

#[test]
fn trailing_garbage_fails() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("extra.json");
    fs::write(&path, "[] []")?;
    assert!(!validate(&path));
    Ok(())
}

#[test]
fn trailing_whitespace_is_tolerated() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("spaced.json");
    fs::write(&path, "[1, 2]\n\n")?;
    assert!(validate(&path));
    Ok(())
}

#[test]
fn empty_file_fails() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("empty.json");
    fs::write(&path, "")?;
    assert!(!validate(&path));
    Ok(())
}

#[test]
fn missing_file_fails() {
    assert!(!validate("no/such/collection.json"));
}

#[cfg(feature = "compression-gzip")]
mod gzip {
    use std::io::Write;

    use super::*;
    use tabson::io::compression::output_stream;

    #[test]
    fn compressed_json_validates_through_the_codec() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("out.json.gz");
        {
            let file = fs::File::create(&path)?;
            let mut writer = output_stream(file, &path)?;
            writer.write_all(b"[{\"a\": 1}]")?;
        }
        assert!(validate(&path));
        Ok(())
    }

    #[test]
    fn corrupt_gzip_fails() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("bad.json.gz");
        // Gzip magic followed by junk.
        fs::write(&path, [0x1f, 0x8b, 0xde, 0xad, 0xbe, 0xef])?;
        assert!(!validate(&path));
        Ok(())
    }
}
