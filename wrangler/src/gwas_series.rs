//! GWAS time series -- one row per sampling day, one column per SNP.
//!
//! The reference (hapmap-style, tab-separated) file fixes the SNP columns. Every file below the
//! input directory whose name ends with [RESULT_SUFFIX](RESULT_SUFFIX) contributes one day.
//! A day that lacks any of the reference SNPs makes the whole run fail.
use crate::chomp;
use crate::error::{malformed, require_dir, require_file, Result, WrangleError};
use definitions::{DayKey, SeriesStats, SnpKey, TimeSeries};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const RESULT_SUFFIX: &str = "GWAS.Results.csv";
// Zero-based columns.
const HAPMAP_CHROM: usize = 2;
const HAPMAP_POS: usize = 3;
const RESULT_CHROM: usize = 1;
const RESULT_POS: usize = 2;
const RESULT_VALUE: usize = 8;

#[derive(Debug, Clone)]
pub struct GwasSeriesConfig {
    dir: PathBuf,
    genotypes: PathBuf,
    outfile: PathBuf,
    sort_days: bool,
}

impl GwasSeriesConfig {
    pub fn new(dir: &Path, genotypes: &Path, outfile: &Path, sort_days: bool) -> Self {
        Self {
            dir: dir.to_path_buf(),
            genotypes: genotypes.to_path_buf(),
            outfile: outfile.to_path_buf(),
            sort_days,
        }
    }
    pub fn validate(&self) -> Result<()> {
        require_dir(&self.dir)?;
        require_file(&self.genotypes, "Genotype hapmap file")
    }
}

/// Reads the reference, walks the directory, and writes the table to the outfile.
pub fn assemble_time_series(config: &GwasSeriesConfig) -> Result<SeriesStats> {
    config.validate()?;
    let snps = read_snps(&config.genotypes)?;
    debug!("SNPS\t{}", snps.len());
    let mut wtr = File::create(&config.outfile).map(BufWriter::new)?;
    let series = assemble(snps, &config.dir, config.sort_days)?;
    series.write_table(&mut wtr)?;
    wtr.flush()?;
    let stats = SeriesStats {
        days: series.days.len(),
        snps: series.snps.len(),
    };
    info!("Wrote {} days x {} SNPs", stats.days, stats.snps);
    Ok(stats)
}

pub fn read_snps(path: &Path) -> Result<Vec<SnpKey>> {
    debug!("Opening {:?}", path);
    let reader = File::open(path).map(BufReader::new)?;
    read_snps_from(reader, path)
}

/// SNP keys in file order. The first line is a header. `source` is only used in error messages.
pub fn read_snps_from<R: BufRead>(reader: R, source: &Path) -> Result<Vec<SnpKey>> {
    let mut snps = vec![];
    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let line = chomp(&line);
        if line.is_empty() {
            continue;
        }
        let fields: Vec<_> = line.split('\t').collect();
        match (fields.get(HAPMAP_CHROM), fields.get(HAPMAP_POS)) {
            (Some(chrom), Some(pos)) => snps.push(SnpKey::new(chrom, pos)),
            _ => {
                let message = format!("{} tab-separated fields, need 4", fields.len());
                return Err(malformed(source, idx, message));
            }
        }
    }
    Ok(snps)
}

/// All result files under `dir`. Files of a directory come before its sub-directories,
/// otherwise the order is whatever `read_dir` gives. Symlinked directories are not followed.
pub fn discover_result_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = vec![];
    walk(dir, &mut files, true)?;
    Ok(files)
}

/// Unreadable sub-directories are skipped with a warning; only `dir` itself must be readable.
fn walk(dir: &Path, files: &mut Vec<PathBuf>, is_top: bool) -> Result<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(why) if !is_top => {
            warn!("Skipping {:?}: {}", dir, why);
            return Ok(());
        }
        Err(why) => return Err(why.into()),
    };
    let mut subdirs = vec![];
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            if !entry.file_type()?.is_symlink() {
                subdirs.push(path);
            }
        } else if entry.file_name().to_string_lossy().ends_with(RESULT_SUFFIX) {
            trace!("FOUND\t{:?}", path);
            files.push(path);
        }
    }
    for subdir in subdirs {
        walk(&subdir, files, false)?;
    }
    Ok(())
}

/// `<a>.<b>.<c>.<d>.<rest>` -> `<c>.<d>`
pub fn day_of(file_name: &str) -> Result<DayKey> {
    let mut fields = file_name.split('.').skip(2);
    match (fields.next(), fields.next()) {
        (Some(first), Some(second)) => Ok(DayKey::new(first, second)),
        _ => Err(WrangleError::MalformedFileName(file_name.to_string())),
    }
}

pub fn read_results(path: &Path) -> Result<HashMap<SnpKey, String>> {
    let reader = File::open(path).map(BufReader::new)?;
    read_results_from(reader, path)
}

/// `<chrom>.<pos>` -> value, from a comma-separated result file with a header line.
pub fn read_results_from<R: BufRead>(reader: R, source: &Path) -> Result<HashMap<SnpKey, String>> {
    let mut values = HashMap::new();
    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let line = chomp(&line);
        if line.is_empty() {
            continue;
        }
        let fields: Vec<_> = line.split(',').collect();
        if fields.len() <= RESULT_VALUE {
            let message = format!("{} comma-separated fields, need 9", fields.len());
            return Err(malformed(source, idx, message));
        }
        let snp = SnpKey::new(fields[RESULT_CHROM], fields[RESULT_POS]);
        values.insert(snp, fields[RESULT_VALUE].to_string());
    }
    Ok(values)
}

pub fn assemble(snps: Vec<SnpKey>, dir: &Path, sort_days: bool) -> Result<TimeSeries> {
    let mut series = TimeSeries::new(snps);
    for path in discover_result_files(dir)? {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let day = day_of(&file_name)?;
        let values = read_results(&path)?;
        debug!("DAY\t{}\t{}\t{:?}", day, values.len(), path);
        if series.values.contains_key(&day) {
            warn!("{} appears twice. {:?} replaces the earlier values.", day, path);
        }
        series.push_day(day, values);
    }
    if sort_days {
        series.sort_days();
    }
    Ok(series)
}

pub trait WriteTable {
    fn write_table<W: Write>(&self, wtr: &mut W) -> Result<()>;
}

impl WriteTable for TimeSeries {
    /// Rows are written one by one; on a missing SNP the rows before it stay in `wtr`.
    fn write_table<W: Write>(&self, wtr: &mut W) -> Result<()> {
        let header: Vec<_> = self.snps.iter().map(|snp| snp.as_str()).collect();
        writeln!(wtr, "time,{}", header.join(","))?;
        for day in self.days.iter() {
            let mut row = vec![day.as_str()];
            for snp in self.snps.iter() {
                match self.value(day, snp) {
                    Some(value) => row.push(value),
                    None => {
                        let (day, snp) = (day.clone(), snp.clone());
                        return Err(WrangleError::MissingSnp { day, snp });
                    }
                }
            }
            writeln!(wtr, "{}", row.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const HAPMAP: &str = "rs#\talleles\tchrom\tpos\tstrand\n\
                          S1_100\tA/G\t1\t100\t+\n\
                          S2_200\tC/T\t2\t200\t+\n\
                          S1_100\tA/G\t1\t100\t+\n";
    fn result_file(rows: &[(&str, &str, &str)]) -> String {
        let mut file = String::from("Trait,Chr,Pos,a,b,c,d,e,p\n");
        for (chrom, pos, p) in rows {
            file += &format!("height,{chrom},{pos},0,0,0,0,0,{p}\n");
        }
        file
    }
    fn write(path: &Path, content: &str) {
        std::fs::write(path, content).unwrap();
    }
    #[test]
    fn snps_in_file_order() {
        let snps = read_snps_from(HAPMAP.as_bytes(), Path::new("ref")).unwrap();
        let snps: Vec<_> = snps.iter().map(|x| x.as_str()).collect();
        assert_eq!(snps, vec!["1.100", "2.200", "1.100"]);
    }
    #[test]
    fn short_hapmap_row() {
        let hapmap = "header\nS1\tA/G\t1\n";
        match read_snps_from(hapmap.as_bytes(), Path::new("ref")) {
            Err(WrangleError::MalformedRow { line, .. }) => assert_eq!(line, 2),
            x => panic!("{:?}", x),
        }
    }
    #[test]
    fn day_from_name() {
        let day = day_of("camelina.height.day.12.GWAS.Results.csv").unwrap();
        assert_eq!(day.as_str(), "day.12");
        assert!(day_of("day12.GWAS").is_err());
    }
    #[test]
    fn results_with_crlf() {
        let file = result_file(&[("1", "100", "0.01")]).replace('\n', "\r\n");
        let values = read_results_from(file.as_bytes(), Path::new("r")).unwrap();
        assert_eq!(values[&SnpKey::new("1", "100")], "0.01");
    }
    #[test]
    fn table_shape() {
        let dir = tempfile::tempdir().unwrap();
        let snps = read_snps_from(HAPMAP.as_bytes(), Path::new("ref")).unwrap();
        let rows = [("1", "100", "0.5"), ("2", "200", "0.25")];
        write(&dir.path().join("cam.h.day.1.GWAS.Results.csv"), &result_file(&rows));
        std::fs::create_dir(dir.path().join("late")).unwrap();
        let late = dir.path().join("late").join("cam.h.day.2.GWAS.Results.csv");
        write(&late, &result_file(&rows));
        write(&dir.path().join("notes.txt"), "not a result");
        let series = assemble(snps, dir.path(), false).unwrap();
        let mut table: Vec<u8> = vec![];
        series.write_table(&mut table).unwrap();
        let table = String::from_utf8(table).unwrap();
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.split(',').count() == 4));
        assert_eq!(lines[0], "time,1.100,2.200,1.100");
        assert_eq!(lines[1], "day.1,0.5,0.25,0.5");
        assert_eq!(lines[2], "day.2,0.5,0.25,0.5");
    }
    #[test]
    fn later_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let snps = vec![SnpKey::new("1", "100")];
        let first = result_file(&[("1", "100", "0.1")]);
        write(&dir.path().join("a.h.day.3.GWAS.Results.csv"), &first);
        std::fs::create_dir(dir.path().join("rerun")).unwrap();
        let second = result_file(&[("1", "100", "0.9")]);
        write(&dir.path().join("rerun/b.h.day.3.GWAS.Results.csv"), &second);
        let series = assemble(snps, dir.path(), false).unwrap();
        let mut table: Vec<u8> = vec![];
        series.write_table(&mut table).unwrap();
        let table = String::from_utf8(table).unwrap();
        assert_eq!(table, "time,1.100\nday.3,0.9\nday.3,0.9\n");
    }
    #[test]
    fn sorted_days() {
        let dir = tempfile::tempdir().unwrap();
        let rows = [("1", "100", "0.1")];
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        write(&dir.path().join("sub/a.h.day.1.GWAS.Results.csv"), &result_file(&rows));
        write(&dir.path().join("a.h.day.2.GWAS.Results.csv"), &result_file(&rows));
        let snps = vec![SnpKey::new("1", "100")];
        let series = assemble(snps.clone(), dir.path(), false).unwrap();
        let days: Vec<_> = series.days.iter().map(|d| d.as_str()).collect();
        assert_eq!(days, vec!["day.2", "day.1"]);
        let series = assemble(snps, dir.path(), true).unwrap();
        let days: Vec<_> = series.days.iter().map(|d| d.as_str()).collect();
        assert_eq!(days, vec!["day.1", "day.2"]);
    }
    #[test]
    fn unreadable_subdir_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("gone");
        let mut files = vec![];
        assert!(walk(&gone, &mut files, false).is_ok());
        assert!(files.is_empty());
        assert!(walk(&gone, &mut files, true).is_err());
    }
    #[test]
    fn missing_snp_is_fatal() {
        let mut series = TimeSeries::new(vec![SnpKey::new("1", "100"), SnpKey::new("9", "9")]);
        let values: HashMap<_, _> = vec![(SnpKey::new("1", "100"), "0.1".to_string())]
            .into_iter()
            .collect();
        series.push_day(DayKey::new("day", "1"), values);
        let mut table: Vec<u8> = vec![];
        match series.write_table(&mut table) {
            Err(WrangleError::MissingSnp { day, snp }) => {
                assert_eq!(day.as_str(), "day.1");
                assert_eq!(snp.as_str(), "9.9");
            }
            x => panic!("{:?}", x),
        }
        assert_eq!(String::from_utf8(table).unwrap(), "time,1.100,9.9\n");
    }
    #[test]
    fn run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let gwas = dir.path().join("gwas");
        std::fs::create_dir(&gwas).unwrap();
        let hapmap = dir.path().join("snps.hmp.txt");
        write(&hapmap, HAPMAP);
        let rows = [("1", "100", "1e-5"), ("2", "200", "0.3")];
        write(&gwas.join("cam.h.day.7.GWAS.Results.csv"), &result_file(&rows));
        let outfile = dir.path().join("heatmap.csv");
        let config = GwasSeriesConfig::new(&gwas, &hapmap, &outfile, false);
        let stats = assemble_time_series(&config).unwrap();
        assert_eq!(stats, SeriesStats { days: 1, snps: 3 });
        let table = std::fs::read_to_string(&outfile).unwrap();
        assert_eq!(table, "time,1.100,2.200,1.100\nday.7,1e-5,0.3,1e-5\n");
    }
    #[test]
    fn missing_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent");
        let hapmap = dir.path().join("snps.hmp.txt");
        let outfile = dir.path().join("out.csv");
        let config = GwasSeriesConfig::new(&absent, &hapmap, &outfile, false);
        assert!(matches!(
            assemble_time_series(&config),
            Err(WrangleError::DirectoryNotFound(_))
        ));
        let config = GwasSeriesConfig::new(dir.path(), &hapmap, &outfile, false);
        assert!(matches!(
            assemble_time_series(&config),
            Err(WrangleError::FileNotFound { .. })
        ));
        assert!(!outfile.exists());
    }
}
