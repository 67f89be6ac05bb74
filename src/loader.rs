use crate::consts::KARYOTYPE_CHR_TOKEN;
use crate::core_types::{Ideogram, Karyotype, Link};
use crate::error::{OrderError, OrderResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

fn open(path: &Path) -> OrderResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| OrderError::read(path, e))
}

pub fn load_karyotype<P: AsRef<Path>>(path: P) -> OrderResult<Karyotype> {
    let path = path.as_ref();
    let file = open(path)?;
    let karyotype = parse_karyotype(file, &path.display().to_string())?;
    info!(
        "📂 Loaded {} ideograms from {}",
        karyotype.len(),
        path.display()
    );
    Ok(karyotype)
}

/// Parses `chr - <name> <label> <start> <end> <color>` lines.
/// Anything not starting with the literal `chr` token (bands, comments) is skipped.
pub fn parse_karyotype<R: BufRead>(reader: R, source: &str) -> OrderResult<Karyotype> {
    let mut ideograms = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() != Some(&KARYOTYPE_CHR_TOKEN) {
            continue;
        }

        let parse_err = |reason: String| OrderError::Parse {
            path: source.to_string(),
            line: line_idx + 1,
            reason,
        };

        if tokens.len() < 6 {
            return Err(parse_err(format!(
                "expected 'chr - name label start end color', found {} tokens",
                tokens.len()
            )));
        }

        let start: i64 = tokens[4]
            .parse()
            .map_err(|_| parse_err(format!("invalid start coordinate '{}'", tokens[4])))?;
        let end: i64 = tokens[5]
            .parse()
            .map_err(|_| parse_err(format!("invalid end coordinate '{}'", tokens[5])))?;
        if end < start {
            return Err(parse_err(format!("end {} precedes start {}", end, start)));
        }

        ideograms.push(Ideogram {
            name: tokens[2].to_string(),
            label: tokens[3].to_string(),
            index: ideograms.len(),
            start,
            end,
        });
    }

    Karyotype::new(ideograms)
}

pub fn load_links<P: AsRef<Path>>(path: P, karyotype: &Karyotype) -> OrderResult<Vec<Link>> {
    let path = path.as_ref();
    let file = open(path)?;
    let links = parse_links(file, &path.display().to_string(), karyotype)?;
    info!("🔗 Loaded {} links from {}", links.len(), path.display());
    Ok(links)
}

/// Parses `id1 start1 end1 id2 start2 end2 [...]` lines; blank and `#` lines are skipped.
pub fn parse_links<R: BufRead>(
    reader: R,
    source: &str,
    karyotype: &Karyotype,
) -> OrderResult<Vec<Link>> {
    let mut links = Vec::new();
    let mut self_links = 0;

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let line_no = line_idx + 1;
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() < 6 {
            return Err(OrderError::Parse {
                path: source.to_string(),
                line: line_no,
                reason: format!(
                    "expected 'id1 start1 end1 id2 start2 end2', found {} tokens",
                    tokens.len()
                ),
            });
        }

        let coord = |s: &str| -> OrderResult<i64> {
            s.parse().map_err(|_| OrderError::Parse {
                path: source.to_string(),
                line: line_no,
                reason: format!("invalid coordinate '{}'", s),
            })
        };
        let lookup = |name: &str| {
            karyotype
                .index_of(name)
                .ok_or_else(|| OrderError::UnknownIdeogram {
                    name: name.to_string(),
                    line: line_no,
                })
        };

        let ideo1 = lookup(tokens[0])?;
        let ideo2 = lookup(tokens[3])?;
        let frac1 = karyotype
            .get(ideo1)
            .fraction(coord(tokens[1])?, coord(tokens[2])?);
        let frac2 = karyotype
            .get(ideo2)
            .fraction(coord(tokens[4])?, coord(tokens[5])?);

        let link = Link {
            ideo1,
            frac1,
            ideo2,
            frac2,
        };
        if link.is_self_link() {
            self_links += 1;
        }
        links.push(link);
    }

    if self_links > 0 {
        debug!("   {} links join an ideogram to itself", self_links);
    }

    Ok(links)
}

/// Reads ideogram names separated by whitespace or commas. `#` starts a comment.
pub fn read_name_list<P: AsRef<Path>>(path: P) -> OrderResult<Vec<String>> {
    let path = path.as_ref();
    let mut names = Vec::new();
    for line in open(path)?.lines() {
        let line = line.map_err(|e| OrderError::read(path, e))?;
        let content = line.split('#').next().unwrap_or("");
        names.extend(
            content
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }
    Ok(names)
}
