use flate2::read::MultiGzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Input file '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),
    #[error("{}", missing_member_message(.archive, .member.as_deref()))]
    ArchiveMemberMissing {
        archive: PathBuf,
        member: Option<String>,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

fn missing_member_message(archive: &Path, member: Option<&str>) -> String {
    match member {
        Some(member) => format!(
            "Member '{}' not found in archive '{}'",
            member,
            archive.display()
        ),
        None => format!(
            "Archive '{}' given without a member (use ARCHIVE.tar:MEMBER)",
            archive.display()
        ),
    }
}

fn is_tar_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("tar"))
}

/// Reports whether a path names a gzip-compressed file, by extension.
pub fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case("gz"))
}

/// Where a structure's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A plain or `.gz` file.
    File(PathBuf),
    /// A member of a tar archive, possibly `.gz` itself.
    ArchiveMember { archive: PathBuf, member: String },
}

impl InputSource {
    /// Parses an input address.
    ///
    /// `archive.tar:member` addresses a tar member; the address is split on its
    /// last `:` and only when the part before it names a `.tar` file. Any other
    /// string is a file path.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::ArchiveMemberMissing`] for a `.tar` path with no
    /// or an empty member.
    pub fn parse(address: &str) -> Result<Self, SourceError> {
        if let Some((archive, member)) = address.rsplit_once(':') {
            if is_tar_path(archive) {
                if member.is_empty() {
                    return Err(SourceError::ArchiveMemberMissing {
                        archive: archive.into(),
                        member: None,
                    });
                }
                return Ok(Self::ArchiveMember {
                    archive: archive.into(),
                    member: member.to_string(),
                });
            }
        }
        if is_tar_path(address) {
            return Err(SourceError::ArchiveMemberMissing {
                archive: address.into(),
                member: None,
            });
        }
        Ok(Self::File(address.into()))
    }

    /// The file that must exist on disk for this source to be readable.
    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) => path,
            Self::ArchiveMember { archive, .. } => archive,
        }
    }

    /// Checks that the file (or archive) is present without opening it.
    pub fn ensure_exists(&self) -> Result<(), SourceError> {
        if self.path().is_file() {
            Ok(())
        } else {
            Err(SourceError::InputNotFound(self.path().to_path_buf()))
        }
    }

    pub fn is_gzip(&self) -> bool {
        match self {
            Self::File(path) => is_gzip_path(path),
            Self::ArchiveMember { member, .. } => is_gzip_path(Path::new(member)),
        }
    }

    /// Opens a fresh buffered reader positioned at the start of the
    /// (decompressed) content.
    ///
    /// Every call reopens the underlying file, so no two readers share a
    /// position or a decompression state.
    pub fn open(&self) -> Result<Box<dyn BufRead>, SourceError> {
        debug!("Opening {} (gzip: {})", self, self.is_gzip());
        match self {
            Self::File(path) => {
                if !path.is_file() {
                    return Err(SourceError::InputNotFound(path.clone()));
                }
                Ok(decoded(File::open(path)?, self.is_gzip()))
            }
            Self::ArchiveMember { archive, member } => {
                if !archive.is_file() {
                    return Err(SourceError::InputNotFound(archive.clone()));
                }
                let bytes = read_member(archive, member)?.ok_or_else(|| {
                    SourceError::ArchiveMemberMissing {
                        archive: archive.clone(),
                        member: Some(member.clone()),
                    }
                })?;
                Ok(decoded(Cursor::new(bytes), self.is_gzip()))
            }
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::ArchiveMember { archive, member } => {
                write!(f, "{}:{}", archive.display(), member)
            }
        }
    }
}

fn decoded<R: Read + 'static>(reader: R, gzip: bool) -> Box<dyn BufRead> {
    if gzip {
        Box::new(BufReader::new(MultiGzDecoder::new(reader)))
    } else {
        Box::new(BufReader::new(reader))
    }
}

fn read_member(archive: &Path, member: &str) -> io::Result<Option<Vec<u8>>> {
    let mut tar = tar::Archive::new(File::open(archive)?);
    let wanted = Path::new(member.trim_start_matches("./"));
    for entry in tar.entries()? {
        let mut entry = entry?;
        let found = {
            let path = entry.path()?;
            path.strip_prefix("./").unwrap_or(&*path) == wanted
        };
        if found {
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            return Ok(Some(bytes));
        }
    }
    Ok(None)
}
