use chrono::Utc;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs::{self, File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

const LOG_FILE_NAME: &str = "app.log.jsonl";
const MAX_LOG_BYTES: u64 = 5 * 1024 * 1024;
const MAX_ROTATIONS: usize = 3;
const DEFAULT_TAIL_BYTES: u64 = 2 * 1024 * 1024;

static LOGGER: OnceCell<AppLogger> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppLogRecord {
    pub ts_ms: i64,
    pub level: String,
    pub scope: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// JSON-lines log sink with size based rotation.
#[derive(Debug)]
pub struct AppLog {
    dir: PathBuf,
    lock: Mutex<()>,
}

fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}

fn rotated_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("app.log.{}.jsonl", index))
}

fn rotate_if_needed(dir: &Path, max_bytes: u64) -> Result<(), String> {
    let path = log_path(dir);
    let Ok(meta) = fs::metadata(&path) else {
        return Ok(());
    };
    if meta.len() < max_bytes {
        return Ok(());
    }

    let oldest = rotated_path(dir, MAX_ROTATIONS);
    if oldest.exists() {
        fs::remove_file(&oldest)
            .map_err(|e| format!("Failed to remove old log {}: {}", oldest.display(), e))?;
    }

    for i in (1..MAX_ROTATIONS).rev() {
        let src = rotated_path(dir, i);
        let dst = rotated_path(dir, i + 1);
        if src.exists() {
            fs::rename(&src, &dst)
                .map_err(|e| format!("Failed to rotate log ({} -> {}): {}", src.display(), dst.display(), e))?;
        }
    }

    let first = rotated_path(dir, 1);
    fs::rename(&path, &first)
        .map_err(|e| format!("Failed to rotate log ({} -> {}): {}", path.display(), first.display(), e))?;
    Ok(())
}

fn read_tail(path: &Path, max_bytes: u64) -> Result<String, String> {
    let mut file = File::open(path).map_err(|e| format!("Failed to open log file: {}", e))?;
    let size = file
        .metadata()
        .map_err(|e| format!("Failed to read log metadata: {}", e))?
        .len();

    let start = if size > max_bytes { size - max_bytes } else { 0 };
    file.seek(SeekFrom::Start(start))
        .map_err(|e| format!("Failed to seek log file: {}", e))?;

    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .map_err(|e| format!("Failed to read log file: {}", e))?;

    // A mid-file start can land inside a record (or a UTF-8 sequence); skip to the next line.
    let body = if start > 0 {
        match buf.iter().position(|&b| b == b'\n') {
            Some(idx) => &buf[idx + 1..],
            None => return Ok(String::new()),
        }
    } else {
        &buf[..]
    };

    Ok(String::from_utf8_lossy(body).into_owned())
}

impl AppLog {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, String> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create log dir: {}", e))?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    pub fn append(&self, record: &AppLogRecord) -> Result<(), String> {
        self.append_with_limit(record, MAX_LOG_BYTES)
    }

    fn append_with_limit(&self, record: &AppLogRecord, max_bytes: u64) -> Result<(), String> {
        let _guard = self.lock.lock();
        rotate_if_needed(&self.dir, max_bytes)?;
        let path = log_path(&self.dir);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let line = serde_json::to_string(record).map_err(|e| format!("Failed to serialize log record: {}", e))?;
        file.write_all(line.as_bytes())
            .and_then(|_| file.write_all(b"\n"))
            .map_err(|e| format!("Failed to write log record: {}", e))?;
        Ok(())
    }

    /// Newest `limit` records across rotations, optionally filtered by a
    /// case-insensitive substring of level, scope or message.
    pub fn read(
        &self,
        limit: usize,
        query: Option<String>,
        tail_bytes: Option<u64>,
    ) -> Result<Vec<AppLogRecord>, String> {
        let _guard = self.lock.lock();
        let q = query.map(|s| s.to_lowercase()).filter(|s| !s.trim().is_empty());
        let mut records = Vec::new();

        let mut paths: Vec<PathBuf> = (1..=MAX_ROTATIONS).rev().map(|i| rotated_path(&self.dir, i)).collect();
        paths.push(log_path(&self.dir));

        for path in paths {
            if !path.exists() {
                continue;
            }
            let content = read_tail(&path, tail_bytes.unwrap_or(DEFAULT_TAIL_BYTES))?;
            for line in content.lines() {
                let Ok(rec) = serde_json::from_str::<AppLogRecord>(line) else {
                    continue;
                };
                if let Some(q) = &q {
                    let hay = format!("{} {} {}", rec.level, rec.scope, rec.message).to_lowercase();
                    if !hay.contains(q) {
                        continue;
                    }
                }
                records.push(rec);
            }
        }

        if records.len() > limit {
            records.drain(0..records.len().saturating_sub(limit));
        }
        Ok(records)
    }

    pub fn clear(&self) -> Result<(), String> {
        let _guard = self.lock.lock();

        let mut paths = vec![log_path(&self.dir)];
        for i in 1..=MAX_ROTATIONS {
            paths.push(rotated_path(&self.dir, i));
        }

        for p in paths {
            if p.exists() {
                fs::remove_file(&p).map_err(|e| format!("Failed to remove log file {}: {}", p.display(), e))?;
            }
        }
        Ok(())
    }
}

fn record_now(level: &str, scope: &str, message: String) -> AppLogRecord {
    AppLogRecord {
        ts_ms: Utc::now().timestamp_millis(),
        level: level.to_string(),
        scope: scope.to_string(),
        message,
        data: None,
    }
}

/// Bridges the `log` facade into [`AppLog`]; the module path becomes the scope.
#[derive(Debug)]
pub struct AppLogger {
    sink: AppLog,
    level: log::LevelFilter,
}

impl log::Log for AppLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let scope = record
            .module_path()
            .map(|m| m.trim_start_matches("desk_shell_lib::"))
            .unwrap_or("app");
        let level = record.level().as_str().to_lowercase();
        let entry = record_now(&level, scope, record.args().to_string());
        if let Err(e) = self.sink.append(&entry) {
            eprintln!("Failed to write log: {}", e);
        }
    }

    fn flush(&self) {}
}

/// Installs the file logger once per process. Later calls keep the first sink.
pub fn init(dir: impl Into<PathBuf>, level: log::LevelFilter) -> Result<&'static AppLog, String> {
    let logger = LOGGER.get_or_try_init(|| {
        AppLog::open(dir).map(|sink| AppLogger { sink, level })
    })?;
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
    Ok(&logger.sink)
}

pub fn installed() -> Option<&'static AppLog> {
    LOGGER.get().map(|l| &l.sink)
}

pub fn install_panic_hook() {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "panic".to_string()
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());

        if let Some(sink) = installed() {
            let _ = sink.append(&record_now("error", "panic", format!("{} ({})", payload, location)));
        }

        prev(info);
    }));
}
