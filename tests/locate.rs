//! Integration tests for install discovery over synthetic directory trees.
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use textract_host::{Locator, Strategy};

fn make_install(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir.join("Content")).unwrap();
    dir.to_path_buf()
}

/// A locator that sees only the given roots and environment.
fn isolated<R: Into<PathBuf>>(roots: Vec<R>, env: Vec<(&str, PathBuf)>) -> Locator {
    Locator::new()
        .registry(false)
        .well_known(false)
        .roots(roots)
        .env_vars(env)
}

#[test]
fn finds_install_below_program_files() {
    let d = tempdir().unwrap();
    let game = make_install(
        &d.path()
            .join("Program Files (x86)/Steam/SteamApps/Common/Terraria"),
    );

    let found = isolated(vec![d.path()], vec![]).locate();
    assert_eq!(found.install.unwrap().dir(), game);
    assert_eq!(found.found_by, Some(Strategy::FilesystemRoots));
}

#[test]
fn finds_install_on_any_root() {
    let empty = tempdir().unwrap();
    let d = tempdir().unwrap();
    let game = make_install(&d.path().join("Games/SteamLibrary/SteamApps/Common/Terraria"));

    let found = isolated(vec![empty.path(), d.path()], vec![]).find();
    assert_eq!(found.unwrap().dir(), game);
}

#[test]
fn finds_steam_directly_below_root() {
    let d = tempdir().unwrap();
    let game = make_install(&d.path().join("Steam/SteamApps/Common/Terraria"));

    let found = isolated(vec![d.path()], vec![]).find();
    assert_eq!(found.unwrap().dir(), game);
}

#[test]
fn skips_candidates_without_content() {
    let d = tempdir().unwrap();
    fs::create_dir_all(d.path().join("Program Files/Steam/SteamApps/Common/Terraria/Images"))
        .unwrap();
    let game = make_install(&d.path().join("Games/Steam/SteamApps/Common/Terraria"));

    let found = isolated(vec![d.path()], vec![]).find();
    assert_eq!(found.unwrap().dir(), game);
}

#[test]
fn steam_env_var_finds_nested_install() {
    let d = tempdir().unwrap();
    let steam = d.path().join("custom/steam-base");
    let game = make_install(&steam.join("SteamApps/Common/Terraria"));

    let found = isolated(
        Vec::<PathBuf>::new(),
        vec![("HOME", d.path().to_path_buf()), ("APP_STEAM_PATH", steam)],
    )
    .locate();
    assert_eq!(found.install.unwrap().dir(), game);
    assert_eq!(found.found_by, Some(Strategy::Environment));
}

#[test]
fn game_env_var_points_at_install() {
    let d = tempdir().unwrap();
    let game = make_install(&d.path().join("somewhere/Terraria 1.4"));

    let found = isolated(Vec::<PathBuf>::new(), vec![("TERRARIA_HOME", game.clone())]).find();
    assert_eq!(found.unwrap().dir(), game);
}

#[test]
fn alias_env_var_points_at_install() {
    let d = tempdir().unwrap();
    let game = make_install(&d.path().join("tAPI"));

    let found = isolated(Vec::<PathBuf>::new(), vec![("TAPI_DIR", game.clone())]).find();
    assert_eq!(found.unwrap().dir(), game);
}

#[test]
fn registered_alias_matches_env_var() {
    let d = tempdir().unwrap();
    let game = make_install(&d.path().join("tModLoader"));
    let env = vec![("TML_HOME", game.clone())];

    assert!(isolated(Vec::<PathBuf>::new(), env.clone()).find().is_none());

    let found = isolated(Vec::<PathBuf>::new(), env).alias("tml").locate();
    assert_eq!(found.install.unwrap().dir(), game);
    assert_eq!(found.found_by, Some(Strategy::Environment));
}

#[test]
fn invalid_env_candidate_does_not_stop_search() {
    let d = tempdir().unwrap();
    let bogus = d.path().join("not-an-install");
    fs::create_dir_all(&bogus).unwrap();
    let steam = d.path().join("Steam");
    let game = make_install(&steam.join("steamapps/common/Terraria"));

    let found = isolated(
        Vec::<PathBuf>::new(),
        vec![("TERRARIA_DIR", bogus.clone()), ("STEAM_ROOT", steam)],
    )
    .locate();
    assert_eq!(found.install.unwrap().dir(), game);
    assert!(found
        .diagnostics
        .iter()
        .any(|diag| diag.strategy == Strategy::Environment && diag.path.as_deref() == Some(bogus.as_path())));
}

#[test]
fn roots_take_precedence_over_environment() {
    let d = tempdir().unwrap();
    let root = d.path().join("root");
    let by_root = make_install(&root.join("Steam/SteamApps/Common/Terraria"));
    let by_env = make_install(&d.path().join("elsewhere/Terraria"));

    let found = isolated(vec![root], vec![("TERRARIA_DIR", by_env)]).find();
    assert_eq!(found.unwrap().dir(), by_root);
}

#[test]
fn nothing_found_is_not_an_error() {
    let d = tempdir().unwrap();
    let unreadable = d.path().join("no-such-root");

    let found = isolated(
        vec![unreadable.clone()],
        vec![("PATH", d.path().to_path_buf()), ("EDITOR", PathBuf::from("vi"))],
    )
    .locate();
    assert!(found.install.is_none());
    assert!(found.found_by.is_none());
    assert!(found.diagnostics.iter().any(|diag| {
        diag.strategy == Strategy::FilesystemRoots && diag.path.as_deref() == Some(unreadable.as_path())
    }));
}

#[test]
fn root_that_is_a_file_is_skipped() {
    let d = tempdir().unwrap();
    let file_root = d.path().join("pagefile.sys");
    fs::write(&file_root, b"").unwrap();
    let game = make_install(&d.path().join("drive/Steam/SteamApps/Common/Terraria"));

    let found = isolated(vec![file_root.clone(), d.path().join("drive")], vec![]).locate();
    assert_eq!(found.install.unwrap().dir(), game);
    assert!(found.diagnostics.iter().any(|diag| {
        diag.strategy == Strategy::FilesystemRoots
            && diag.path.as_deref() == Some(file_root.as_path())
            && diag.message.starts_with("cannot list")
    }));
}

#[cfg(unix)]
#[test]
fn unreadable_root_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let d = tempdir().unwrap();
    let locked = d.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // Running as root: permissions are not enforced.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let found = isolated(vec![locked.clone()], vec![]).locate();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(found.install.is_none());
    assert!(found.diagnostics.iter().any(|diag| {
        diag.strategy == Strategy::FilesystemRoots && diag.path.as_deref() == Some(locked.as_path())
    }));
}

#[test]
fn well_known_roots_are_searched_last() {
    let d = tempdir().unwrap();
    let steam = d.path().join(".local/share/Steam");
    let game = make_install(&steam.join("steamapps/common/Terraria"));

    let found = isolated(Vec::<PathBuf>::new(), vec![])
        .well_known(true)
        .well_known_roots([steam])
        .locate();
    assert_eq!(found.install.unwrap().dir(), game);
    assert_eq!(found.found_by, Some(Strategy::WellKnown));
}

#[test]
fn secondary_steam_library_is_searched() {
    let d = tempdir().unwrap();
    let steam = d.path().join("Program Files/Steam");
    fs::create_dir_all(steam.join("SteamApps/Common")).unwrap();
    let library = d.path().join("Games/Library");
    let game = make_install(&library.join("SteamApps/Common/Terraria"));

    let vdf = format!(
        "\"libraryfolders\"\n{{\n\t\"1\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n}}\n",
        library.display().to_string().replace('\\', "\\\\")
    );
    fs::write(steam.join("SteamApps/libraryfolders.vdf"), vdf).unwrap();

    let found = isolated(vec![d.path()], vec![]).find();
    assert_eq!(found.unwrap().dir(), game);
}

#[test]
fn app_name_is_configurable() {
    let d = tempdir().unwrap();
    let game = make_install(&d.path().join("Steam/SteamApps/Common/tModLoader"));

    let found = isolated(vec![d.path()], vec![])
        .app_name("tModLoader")
        .find();
    assert_eq!(found.unwrap().dir(), game);
}
