//! Result printing, as plain text or JSON lines.

use std::io::Write;

use anyhow::Result;
use chopchop_core::Record;
use serde::Serialize;

#[derive(Serialize)]
struct RowCount {
    rowcount: u64,
}

#[derive(Serialize)]
struct DigestMatch<'a> {
    digest: &'a str,
    name: &'a str,
}

/// Writes results to `W` in the selected format.
pub struct Output<W: Write> {
    writer: W,
    json: bool,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, json: bool) -> Self {
        Self { writer, json }
    }

    fn json_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn rowcount(&mut self, rowcount: u64) -> Result<()> {
        if self.json {
            self.json_line(&RowCount { rowcount })
        } else {
            writeln!(self.writer, "{}", rowcount)?;
            Ok(())
        }
    }

    pub fn record(&mut self, record: &Record) -> Result<()> {
        if self.json {
            return self.json_line(record);
        }
        let d = &record.digests;
        writeln!(
            self.writer,
            "{} {} {} {} {}",
            d.md5,
            d.sha1,
            d.crc32,
            d.custom.as_deref().unwrap_or("None"),
            record.name
        )?;
        Ok(())
    }

    pub fn digest_match(&mut self, digest: &str, name: &str) -> Result<()> {
        if self.json {
            self.json_line(&DigestMatch { digest, name })
        } else {
            writeln!(self.writer, "{} {}", digest, name)?;
            Ok(())
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}
