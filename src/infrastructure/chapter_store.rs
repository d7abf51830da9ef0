//! 章节存储 - 基础设施层
//!
//! 只负责章节目录的扫描与读取，每次请求都重新读取磁盘，不做缓存

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::ChapterError;
use crate::models::chapter::{is_safe_chapter_id, CHAPTER_EXTENSION};

/// 章节存储
#[derive(Debug, Clone)]
pub struct ChapterStore {
    chapters_dir: PathBuf,
}

impl ChapterStore {
    pub fn new(chapters_dir: impl Into<PathBuf>) -> Self {
        Self {
            chapters_dir: chapters_dir.into(),
        }
    }

    pub fn chapters_dir(&self) -> &Path {
        &self.chapters_dir
    }

    /// 确保章节目录存在
    pub async fn ensure_dir(&self) -> Result<(), ChapterError> {
        fs::create_dir_all(&self.chapters_dir)
            .await
            .map_err(|source| self.io_error(&self.chapters_dir, source))
    }

    /// 列出所有章节 ID
    ///
    /// 扩展名匹配忽略大小写，结果升序且去重（`intro.txt` 与 `intro.TXT` 只算一个）。
    /// 不符合安全字符集的文件名（如 `my notes.txt`）不会列出，保证列出的 ID 都能读取
    pub async fn list_chapter_ids(&self) -> Result<Vec<String>, ChapterError> {
        let mut ids = BTreeSet::new();
        let mut entries = fs::read_dir(&self.chapters_dir)
            .await
            .map_err(|source| self.io_error(&self.chapters_dir, source))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| self.io_error(&self.chapters_dir, source))?
        {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                debug!("跳过非 UTF-8 文件名: {:?}", file_name);
                continue;
            };
            let Some(stem) = chapter_stem(name).filter(|stem| is_safe_chapter_id(stem)) else {
                continue;
            };
            if is_regular_file(&entry.path()).await {
                ids.insert(stem.to_string());
            }
        }

        Ok(ids.into_iter().collect())
    }

    /// 读取章节全文
    ///
    /// ID 不符合安全字符集时直接拒绝，不会访问文件系统
    pub async fn read_chapter_text(&self, chapter_id: &str) -> Result<String, ChapterError> {
        let path = self.resolve_chapter_path(chapter_id).await?;
        debug!("读取章节文件: {}", path.display());
        fs::read_to_string(&path)
            .await
            .map_err(|source| self.io_error(&path, source))
    }

    /// 定位章节文件
    ///
    /// 优先使用 `{id}.txt`，否则接受扩展名大小写不同的同名文件
    pub async fn resolve_chapter_path(&self, chapter_id: &str) -> Result<PathBuf, ChapterError> {
        if !is_safe_chapter_id(chapter_id) {
            return Err(ChapterError::InvalidId {
                id: chapter_id.to_string(),
            });
        }

        let exact = self
            .chapters_dir
            .join(format!("{}.{}", chapter_id, CHAPTER_EXTENSION));
        if is_regular_file(&exact).await {
            return Ok(exact);
        }

        let not_found = || ChapterError::NotFound {
            id: chapter_id.to_string(),
        };
        let mut entries = fs::read_dir(&self.chapters_dir)
            .await
            .map_err(|_| not_found())?;
        while let Ok(Some(entry)) = entries.next_entry().await {
            let file_name = entry.file_name();
            if file_name.to_str().and_then(chapter_stem) == Some(chapter_id) {
                let path = entry.path();
                if is_regular_file(&path).await {
                    return Ok(path);
                }
            }
        }

        Err(not_found())
    }

    /// 定位可供原样下载的文件
    ///
    /// 文件名必须符合安全字符集（不允许任何路径分隔符），且是章节目录下的普通文件
    pub async fn resolve_download(&self, file_name: &str) -> Result<PathBuf, ChapterError> {
        if !is_safe_chapter_id(file_name) {
            return Err(ChapterError::InvalidId {
                id: file_name.to_string(),
            });
        }
        let path = self.chapters_dir.join(file_name);
        if is_regular_file(&path).await {
            Ok(path)
        } else {
            Err(ChapterError::NotFound {
                id: file_name.to_string(),
            })
        }
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> ChapterError {
        ChapterError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// 文件名以 `.txt`（忽略大小写）结尾时返回去掉扩展名的部分
fn chapter_stem(file_name: &str) -> Option<&str> {
    let suffix_len = CHAPTER_EXTENSION.len() + 1;
    let bytes = file_name.as_bytes();
    if bytes.len() <= suffix_len {
        return None;
    }
    let (stem, suffix) = bytes.split_at(bytes.len() - suffix_len);
    if suffix[0] == b'.' && suffix[1..].eq_ignore_ascii_case(CHAPTER_EXTENSION.as_bytes()) {
        // 后缀是 ASCII，切分点必然落在字符边界上
        std::str::from_utf8(stem).ok()
    } else {
        None
    }
}

async fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
