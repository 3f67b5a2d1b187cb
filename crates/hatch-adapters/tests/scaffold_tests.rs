//! End-to-end scaffolding against real adapters.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Barrier,
    thread,
};

use hatch_adapters::{DescriptorFormat, LocalFilesystem, MemoryFilesystem, TemplateRepository};
use hatch_core::{
    application::{ApplicationError, ProjectScaffolder, TemplateService, ports::Filesystem},
    domain::{ScaffoldRequest, TemplateDescriptor, TemplateId},
    error::{HatchError, HatchResult},
};
use tempfile::TempDir;

// ── helpers ───────────────────────────────────────────────────────────────────

const EMPTY_PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<template>
  <name>Empty Project</name>
  <projectFile>project.doors_engine</projectFile>
  <folders>
    <folder>.DoorsEngine</folder>
    <folder>Content</folder>
    <folder>GameCode</folder>
  </folders>
</template>"#;

const GAME_PROJECT: &str = r#"<template>
  <name>Game</name>
  <projectFile>{{PROJECT_NAME}}.doors_engine</projectFile>
  <folders>
    <folder>GameCode</folder>
  </folders>
  <seedFiles>
    <file source="seed/main.cpp" destination="GameCode/{{PROJECT_NAME_SNAKE}}.cpp" substitute="true"/>
    <file source="seed/icon.bin" destination="Content/icon.bin"/>
    <file source="seed/project.in" destination="{{PROJECT_NAME}}.doors_engine" substitute="true"/>
  </seedFiles>
</template>"#;

fn write(root: &Path, rel: &str, content: impl AsRef<[u8]>) {
    let full = root.join(rel);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

/// A template root holding `empty` and `game`.
fn template_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "empty/template.xml", EMPTY_PROJECT);
    write(temp.path(), "game/template.xml", GAME_PROJECT);
    write(
        temp.path(),
        "game/seed/main.cpp",
        "// {{PROJECT_NAME}} ({{TEMPLATE_NAME}})\nint main() { return {{NOT_A_VAR}}; }\n",
    );
    write(temp.path(), "game/seed/icon.bin", [0u8, 159, 146, 150, b'{', b'{']);
    write(temp.path(), "game/seed/project.in", "name = {{PROJECT_NAME}}\n");
    temp
}

fn scan(root: &Path) -> TemplateService {
    let repository = TemplateRepository::with_format(DescriptorFormat::Xml);
    TemplateService::scan(&repository, root).unwrap()
}

fn local_scaffolder() -> ProjectScaffolder {
    ProjectScaffolder::new(Box::new(LocalFilesystem::new()))
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ── example scenario ──────────────────────────────────────────────────────────

#[test]
fn empty_template_creates_folders_and_project_file() {
    let templates = template_root();
    let ws = TempDir::new().unwrap();
    let service = scan(templates.path());
    let descriptor = service.get(&TemplateId::new("empty")).unwrap();

    let request = ScaffoldRequest::new("Foo", ws.path(), "empty");
    let project = local_scaffolder().create(descriptor, &request).unwrap();

    let root = ws.path().join("Foo");
    assert_eq!(project.root, root);
    assert_eq!(project.project_file, root.join("project.doors_engine"));
    assert_eq!(
        listing(&root),
        vec![".DoorsEngine", "Content", "GameCode", "project.doors_engine"]
    );
    assert!(root.join("Content").is_dir());
    assert_eq!(fs::read(root.join("project.doors_engine")).unwrap(), b"");
    assert_eq!(listing(ws.path()), vec!["Foo"]);

    // Repeat fails and leaves everything as it was.
    let err = local_scaffolder().create(descriptor, &request).unwrap_err();
    assert!(matches!(
        err,
        HatchError::Application(ApplicationError::ProjectExists { .. })
    ));
    assert_eq!(listing(ws.path()), vec!["Foo"]);
}

#[test]
fn seed_files_are_copied_and_substituted() {
    let templates = template_root();
    let ws = TempDir::new().unwrap();
    let service = scan(templates.path());
    let descriptor = service.get(&TemplateId::new("game")).unwrap();

    let request = ScaffoldRequest::new("SpaceShooter", ws.path(), "game");
    let project = local_scaffolder().create(descriptor, &request).unwrap();

    let root = ws.path().join("SpaceShooter");
    assert_eq!(project.project_file, root.join("SpaceShooter.doors_engine"));
    assert_eq!(
        fs::read_to_string(root.join("GameCode/space_shooter.cpp")).unwrap(),
        "// SpaceShooter (Game)\nint main() { return {{NOT_A_VAR}}; }\n"
    );
    assert_eq!(
        fs::read(root.join("Content/icon.bin")).unwrap(),
        vec![0u8, 159, 146, 150, b'{', b'{']
    );
    // A seed targeting the project file replaces the empty placeholder.
    assert_eq!(
        fs::read_to_string(&project.project_file).unwrap(),
        "name = SpaceShooter\n"
    );
}

#[test]
fn missing_parent_is_created() {
    let templates = template_root();
    let ws = TempDir::new().unwrap();
    let service = scan(templates.path());
    let descriptor = service.get(&TemplateId::new("empty")).unwrap();

    let parent = ws.path().join("deep/er");
    let request = ScaffoldRequest::new("Foo", &parent, "empty");
    local_scaffolder().create(descriptor, &request).unwrap();

    assert!(parent.join("Foo/project.doors_engine").is_file());
}

#[test]
fn existing_root_is_left_untouched() {
    let templates = template_root();
    let ws = TempDir::new().unwrap();
    write(ws.path(), "Foo/notes.txt", "mine");
    let service = scan(templates.path());
    let descriptor = service.get(&TemplateId::new("empty")).unwrap();

    let err = local_scaffolder()
        .create(descriptor, &ScaffoldRequest::new("Foo", ws.path(), "empty"))
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(listing(&ws.path().join("Foo")), vec!["notes.txt"]);
    assert_eq!(
        fs::read_to_string(ws.path().join("Foo/notes.txt")).unwrap(),
        "mine"
    );
}

#[test]
fn illegal_names_are_rejected_before_touching_disk() {
    let templates = template_root();
    let ws = TempDir::new().unwrap();
    let service = scan(templates.path());
    let descriptor = service.get(&TemplateId::new("empty")).unwrap();

    for name in ["", "..", "a/b", "CON", "name.", "x:y"] {
        let err = local_scaffolder()
            .create(descriptor, &ScaffoldRequest::new(name, ws.path(), "empty"))
            .unwrap_err();
        assert_eq!(
            err.category(),
            hatch_core::error::ErrorCategory::Validation,
            "{name:?}"
        );
    }
    assert!(listing(ws.path()).is_empty());
}

// ── failure cleanup ───────────────────────────────────────────────────────────

/// Local filesystem that fails writes to one file name.
struct FailingFilesystem {
    inner: LocalFilesystem,
    fail_on: &'static str,
}

impl Filesystem for FailingFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }
    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }
    fn create_dir(&self, path: &Path) -> HatchResult<()> {
        self.inner.create_dir(path)
    }
    fn create_dir_all(&self, path: &Path) -> HatchResult<()> {
        self.inner.create_dir_all(path)
    }
    fn read_file(&self, path: &Path) -> HatchResult<Vec<u8>> {
        self.inner.read_file(path)
    }
    fn write_file(&self, path: &Path, content: &[u8]) -> HatchResult<()> {
        if path.file_name().is_some_and(|n| n == self.fail_on) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "simulated write failure".into(),
            }
            .into());
        }
        self.inner.write_file(path, content)
    }
    fn rename_no_replace(&self, from: &Path, to: &Path) -> HatchResult<()> {
        self.inner.rename_no_replace(from, to)
    }
    fn remove_dir_all(&self, path: &Path) -> HatchResult<()> {
        self.inner.remove_dir_all(path)
    }
    fn absolute(&self, path: &Path) -> HatchResult<PathBuf> {
        self.inner.absolute(path)
    }
}

#[test]
fn staging_failure_leaves_no_trace() {
    let templates = template_root();
    let ws = TempDir::new().unwrap();
    write(ws.path(), "other/keep.txt", "x");
    let before = listing(ws.path());

    let service = scan(templates.path());
    let descriptor = service.get(&TemplateId::new("game")).unwrap();
    let scaffolder = ProjectScaffolder::new(Box::new(FailingFilesystem {
        inner: LocalFilesystem::new(),
        fail_on: "icon.bin",
    }));

    let err = scaffolder
        .create(descriptor, &ScaffoldRequest::new("Foo", ws.path(), "game"))
        .unwrap_err();

    assert!(matches!(
        err,
        HatchError::Application(ApplicationError::StagingFailed { .. })
    ));
    assert_eq!(listing(ws.path()), before);
}

// ── concurrency ───────────────────────────────────────────────────────────────

#[test]
fn concurrent_creates_of_one_root_have_one_winner() {
    let templates = template_root();
    let ws = TempDir::new().unwrap();
    let service = scan(templates.path());
    let descriptor = service.get(&TemplateId::new("game")).unwrap();

    for round in 0..16 {
        let name = format!("Race{round}");
        let barrier = Barrier::new(2);

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let request = ScaffoldRequest::new(name.as_str(), ws.path(), "game");
                    let barrier = &barrier;
                    s.spawn(move || {
                        let scaffolder = local_scaffolder();
                        barrier.wait();
                        scaffolder.create(descriptor, &request)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1, "round {round}");
        let loser = results.iter().find_map(|r| r.as_ref().err()).unwrap();
        assert!(loser.is_conflict(), "round {round}: {loser}");
    }

    // Only committed projects remain; no staging directories.
    let names = listing(ws.path());
    assert_eq!(names.len(), 16);
    assert!(names.iter().all(|n| n.starts_with("Race")));
}

#[test]
fn concurrent_creates_of_different_roots_are_independent() {
    let templates = template_root();
    let ws = TempDir::new().unwrap();
    let service = scan(templates.path());
    let descriptor: &TemplateDescriptor = service.get(&TemplateId::new("empty")).unwrap();

    thread::scope(|s| {
        for i in 0..8 {
            let parent = ws.path().to_path_buf();
            s.spawn(move || {
                let request = ScaffoldRequest::new(format!("P{i}"), parent, "empty");
                local_scaffolder().create(descriptor, &request).unwrap();
            });
        }
    });

    assert_eq!(listing(ws.path()).len(), 8);
}

// ── in-memory adapter ─────────────────────────────────────────────────────────

#[test]
fn memory_filesystem_runs_the_same_flow() {
    let descriptor = TemplateDescriptor::builder("game")
        .display_name("Game")
        .project_file_name("{{PROJECT_NAME}}.proj")
        .folder("Source")
        .seed_file("main.cpp", "Source/main.cpp", true)
        .source_dir("/templates/game")
        .build()
        .unwrap();

    let memory = MemoryFilesystem::new();
    memory.seed_file("/templates/game/main.cpp", "// {{PROJECT_NAME}}");
    let scaffolder = ProjectScaffolder::new(Box::new(memory.clone()));

    let plan = scaffolder
        .plan(&descriptor, &ScaffoldRequest::new("Demo", "/ws", "game"))
        .unwrap();
    assert_eq!(plan.structure().entry_count(), 3);
    assert!(!memory.exists(Path::new("/ws")), "plan must not write");

    let project = scaffolder.execute(&plan).unwrap();

    assert_eq!(project.project_file, PathBuf::from("/ws/Demo/Demo.proj"));
    assert_eq!(
        memory.contents(Path::new("/ws/Demo/Source/main.cpp")),
        Some(b"// Demo".to_vec())
    );
    assert_eq!(memory.list_dir(Path::new("/ws")), vec![PathBuf::from("/ws/Demo")]);
    assert_eq!(
        memory.list_files(),
        vec![
            PathBuf::from("/templates/game/main.cpp"),
            PathBuf::from("/ws/Demo/Demo.proj"),
            PathBuf::from("/ws/Demo/Source/main.cpp"),
        ]
    );

    // Executing the same plan again cannot overwrite.
    let err = scaffolder.execute(&plan).unwrap_err();
    assert!(matches!(
        err,
        HatchError::Application(ApplicationError::CommitConflict { .. })
    ));
    assert_eq!(memory.list_dir(Path::new("/ws")), vec![PathBuf::from("/ws/Demo")]);
}
