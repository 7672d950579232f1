//! Linker flags inferred from `#include` directives

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

static INCLUDE_RE: OnceLock<Regex> = OnceLock::new();

/// Linker flags needed for a known header, empty for anything else
pub fn flags_for_header(header: &str) -> &'static [&'static str] {
    match header {
        "SDL2/SDL.h" => &["-lSDL2"],
        "SDL2/SDL_image.h" => &["-lSDL2_image"],
        "SDL2/SDL_ttf.h" => &["-lSDL2_ttf"],
        "curl/curl.h" => &["-lcurl"],
        "jansson.h" => &["-ljansson"],
        "openssl/sha.h" => &["-lssl", "-lcrypto"],
        "gtk/gtk.h" => &["$(pkg-config --cflags --libs gtk+-3.0)"],
        "zlib.h" => &["-lz"],
        "ncurses.h" => &["-lncurses"],
        "math.h" => &["-lm"],
        "pthread.h" => &["-pthread"],
        "unistd.h" | "sys/types.h" | "sys/ioctl.h" => &["-lutil"],
        "sys/socket.h" => &["-lsocket"],
        "sys/stat.h" => &["-lstat"],
        "sys/time.h" => &["-lrt"],
        "SDL2_gfxPrimitives.h" | "SDL2/SDL2_gfxPrimitives.h" => &["-lSDL2_gfx"],
        _ => &[],
    }
}

/// Header named by an `#include` line, if the line is one
pub fn included_header(line: &str) -> Option<&str> {
    let re = INCLUDE_RE.get_or_init(|| {
        Regex::new(r#"^#include\s*[<"]?\s*([^<>"\s]+)"#).expect("include regex")
    });
    re.captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Flags for every recognised include, in source order
///
/// Duplicates are kept so the output stays a plain function of the source.
pub fn collect_linker_flags(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(included_header)
        .flat_map(flags_for_header)
        .map(|flag| flag.to_string())
        .collect()
}

/// Reads `path` and collects its linker flags; an unreadable file has none
pub fn read_linker_flags(path: &Path) -> Vec<String> {
    match std::fs::read(path) {
        Ok(bytes) => collect_linker_flags(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            tracing::debug!("could not read {:?} for include scan: {}", path, e);
            Vec::new()
        }
    }
}
