//! Font discovery for the report renderer.
//!
//! `genpdf` embeds TrueType fonts, so a regular/bold/italic/bold-italic set has to be found on
//! disk before anything can be laid out.  Directories are searched in this order:
//!
//! 1. the directory passed through [`crate::RenderOptions::with_fonts_dir`],
//! 2. the `BIAS_REPORT_FONTS_DIR` environment variable,
//! 3. `assets/fonts` next to the running executable,
//! 4. `assets/fonts` inside this crate,
//! 5. well-known system font directories.
//!
//! Each directory is checked for every [`KNOWN_FAMILIES`] entry; the first complete set wins.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use log::{debug, warn};

/// Environment variable naming an extra font directory.
pub const FONTS_DIR_ENV: &str = "BIAS_REPORT_FONTS_DIR";

/// File names of the four faces of a font family.
#[derive(Clone, Copy, Debug)]
pub struct FontFaces {
    /// Human readable family name.
    pub name: &'static str,
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

impl FontFaces {
    fn files(&self) -> [(&'static str, &'static str); 4] {
        [
            (self.regular, "regular"),
            (self.bold, "bold"),
            (self.italic, "italic"),
            (self.bold_italic, "bold italic"),
        ]
    }

    fn missing_in(&self, directory: &Path) -> Vec<&'static str> {
        self.files()
            .iter()
            .map(|(file, _)| *file)
            .filter(|file| !directory.join(file).is_file())
            .collect()
    }
}

/// Families the renderer knows how to load, in order of preference.
pub const KNOWN_FAMILIES: &[FontFaces] = &[
    FontFaces {
        name: "Liberation Sans",
        regular: "LiberationSans-Regular.ttf",
        bold: "LiberationSans-Bold.ttf",
        italic: "LiberationSans-Italic.ttf",
        bold_italic: "LiberationSans-BoldItalic.ttf",
    },
    FontFaces {
        name: "DejaVu Sans",
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
    },
    FontFaces {
        name: "Roboto",
        regular: "Roboto-Regular.ttf",
        bold: "Roboto-Bold.ttf",
        italic: "Roboto-Italic.ttf",
        bold_italic: "Roboto-BoldItalic.ttf",
    },
    FontFaces {
        name: "Arial",
        regular: "arial.ttf",
        bold: "arialbd.ttf",
        italic: "ariali.ttf",
        bold_italic: "arialbi.ttf",
    },
];

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/dejavu-sans-fonts",
    "/usr/share/fonts/TTF",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
];

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

/// Returns the directories searched for fonts, in order.
pub fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = explicit {
        push_unique(&mut candidates, path.to_path_buf());
    }

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        push_unique(&mut candidates, path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(
        &mut candidates,
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    );

    for directory in SYSTEM_FONT_DIRECTORIES {
        push_unique(&mut candidates, PathBuf::from(directory));
    }

    for var in ["WINDIR", "SystemRoot"] {
        if let Some(root) = env_path(var) {
            push_unique(&mut candidates, root.join("Fonts"));
        }
    }

    candidates
}

fn resolve_font_directory(explicit: Option<&Path>) -> Result<(PathBuf, FontFaces), Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates(explicit) {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        for faces in KNOWN_FAMILIES {
            let missing = faces.missing_in(&candidate);
            if missing.is_empty() {
                return Ok((candidate, *faces));
            }
            debug!(
                "{} in {} is incomplete: missing {}",
                faces.name,
                candidate.display(),
                missing.join(", ")
            );
        }

        attempts.push(format!("{} (no complete family)", candidate.display()));
    }

    Err(Error::new(
        format!(
            "Unable to locate a usable font family. Checked: {}. Set {} to a directory containing {}.",
            attempts.join(", "),
            FONTS_DIR_ENV,
            KNOWN_FAMILIES
                .iter()
                .map(|faces| faces.name)
                .collect::<Vec<_>>()
                .join(" or ")
        ),
        io::Error::new(io::ErrorKind::NotFound, "no font family found"),
    ))
}

fn load_face(directory: &Path, file: &str, face: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load {} font at {}: {}",
                face,
                path.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

/// Loads the first complete font family found in the search path.
///
/// `explicit` takes precedence over every other location; when it is given but unusable the
/// search continues and a warning is logged.
pub fn default_font_family(explicit: Option<&Path>) -> Result<FontFamily<FontData>, Error> {
    let (directory, faces) = resolve_font_directory(explicit)?;

    if let Some(requested) = explicit {
        if requested != directory.as_path() {
            warn!(
                "Font directory {} is unusable; falling back to {} from {}.",
                requested.display(),
                faces.name,
                directory.display()
            );
        }
    }
    debug!("Using {} fonts from {}", faces.name, directory.display());

    let [regular, bold, italic, bold_italic] = faces.files();
    Ok(FontFamily {
        regular: load_face(&directory, regular.0, regular.1)?,
        bold: load_face(&directory, bold.0, bold.1)?,
        italic: load_face(&directory, italic.0, italic.1)?,
        bold_italic: load_face(&directory, bold_italic.0, bold_italic.1)?,
    })
}

/// Indicates whether a complete font family can be found without loading it.
pub fn default_fonts_available(explicit: Option<&Path>) -> bool {
    resolve_font_directory(explicit).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_searched_first() {
        let explicit = Path::new("/opt/report-fonts");
        let candidates = font_directory_candidates(Some(explicit));
        assert_eq!(candidates.first().map(PathBuf::as_path), Some(explicit));
    }

    #[test]
    fn candidates_are_unique() {
        let candidates = font_directory_candidates(Some(Path::new("/usr/share/fonts/TTF")));
        let occurrences = candidates
            .iter()
            .filter(|path| path.as_path() == Path::new("/usr/share/fonts/TTF"))
            .count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn dejavu_sans_is_a_known_family() {
        let dejavu = KNOWN_FAMILIES
            .iter()
            .find(|faces| faces.name == "DejaVu Sans")
            .expect("DejaVu Sans entry");
        let files: Vec<_> = dejavu.files().iter().map(|(file, _)| *file).collect();
        assert_eq!(
            files,
            [
                "DejaVuSans.ttf",
                "DejaVuSans-Bold.ttf",
                "DejaVuSans-Oblique.ttf",
                "DejaVuSans-BoldOblique.ttf",
            ]
        );
    }

    #[test]
    fn dejavu_system_directories_are_searched() {
        let candidates = font_directory_candidates(None);
        for directory in ["/usr/share/fonts/truetype/dejavu", "/usr/share/fonts/dejavu"] {
            assert!(
                candidates.iter().any(|path| path.as_path() == Path::new(directory)),
                "{directory} should be searched"
            );
        }
    }

    #[test]
    fn complete_dejavu_directory_is_resolved() {
        let directory = env::temp_dir().join(format!("bias_report_dejavu_{}", std::process::id()));
        std::fs::create_dir_all(&directory).expect("create font directory");
        for file in [
            "DejaVuSans.ttf",
            "DejaVuSans-Bold.ttf",
            "DejaVuSans-Oblique.ttf",
            "DejaVuSans-BoldOblique.ttf",
        ] {
            std::fs::write(directory.join(file), b"").expect("write font stub");
        }

        let (resolved, faces) = resolve_font_directory(Some(&directory)).expect("resolves");
        assert_eq!(resolved, directory);
        assert_eq!(faces.name, "DejaVu Sans");

        let _ = std::fs::remove_dir_all(&directory);
    }

    #[test]
    fn missing_directory_lists_every_face() {
        let missing = KNOWN_FAMILIES[0].missing_in(Path::new("/__bias_report_missing_fonts__"));
        assert_eq!(missing.len(), 4);
    }
}
