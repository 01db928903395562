//! Common test utilities for pnp-vendorize integration tests
//!
//! [`TestProject`] lays out a Yarn Plug'n'Play install by hand: a
//! `package.json`, a `.pnp.data.json` registry, and package trees under
//! `.yarn/unplugged/` or zip archives under `.yarn/cache/`.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Command for the compiled binary
#[allow(deprecated)]
pub fn vendorize_cmd() -> Command {
    Command::cargo_bin("pnp-vendorize").unwrap()
}

/// One registry entry of the hand-written PnP state
struct RegistryEntry {
    name: String,
    reference: String,
    location: String,
    dependencies: Vec<(String, String)>,
}

/// A temporary project with a hand-written PnP install
pub struct TestProject {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Project root (the vendorizing workspace)
    pub path: PathBuf,
    name: String,
    packages: Vec<RegistryEntry>,
}

impl TestProject {
    pub fn new(name: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join(name);
        std::fs::create_dir_all(&path).expect("Failed to create project directory");
        Self {
            temp,
            path,
            name: name.to_string(),
            packages: Vec::new(),
        }
    }

    /// Write `package.json` with the given `vendorize` value
    pub fn with_vendorize(self, vendorize: Value) -> Self {
        self.write_file(
            "package.json",
            &serde_json::to_string_pretty(&json!({
                "name": self.name,
                "version": "1.0.0",
                "vendorize": vendorize,
            }))
            .expect("Failed to serialize package.json"),
        );
        self
    }

    /// Add an unplugged package with its files; dependencies are
    /// `(name, reference)` pairs
    #[allow(dead_code)]
    pub fn with_package(
        mut self,
        name: &str,
        version: &str,
        files: &[(&str, &str)],
        dependencies: &[(&str, &str)],
    ) -> Self {
        let folder = self.write_unplugged(name, version, files);
        let location = format!("./.yarn/{folder}/node_modules/{name}/");
        self.push_entry(name, format!("npm:{version}"), location, dependencies);
        self
    }

    /// Add a package stored in a cache zip, the way Yarn keeps most packages
    #[allow(dead_code)]
    pub fn with_zipped_package(
        mut self,
        name: &str,
        version: &str,
        files: &[(&str, &str)],
    ) -> Self {
        let archive = self.write_archive(name, version, files, &[]);
        let location = format!("./.yarn/{archive}/node_modules/{name}/");
        self.push_entry(name, format!("npm:{version}"), location, &[]);
        self
    }

    /// Add a cache zip whose entries carry explicit unix permissions
    #[allow(dead_code)]
    pub fn with_zipped_package_modes(
        mut self,
        name: &str,
        version: &str,
        files: &[(&str, &str, u32)],
    ) -> Self {
        let contents: Vec<(&str, &str)> = files.iter().map(|(p, c, _)| (*p, *c)).collect();
        let modes: Vec<u32> = files.iter().map(|(_, _, mode)| *mode).collect();
        let archive = self.write_archive(name, version, &contents, &modes);
        let location = format!("./.yarn/{archive}/node_modules/{name}/");
        self.push_entry(name, format!("npm:{version}"), location, &[]);
        self
    }

    /// Add a package with peer dependencies. Yarn registers it under a
    /// `virtual:` reference whose location goes through `.yarn/__virtual__/`,
    /// while the files stay in the cache zip (or the unplugged folder)
    #[allow(dead_code)]
    pub fn with_virtual_package(
        mut self,
        name: &str,
        version: &str,
        hash: &str,
        files: &[(&str, &str)],
        zipped: bool,
    ) -> Self {
        let real = if zipped {
            self.write_archive(name, version, files, &[])
        } else {
            self.write_unplugged(name, version, files)
        };
        let location = format!(
            "./.yarn/__virtual__/{}-virtual-{hash}/0/{real}/node_modules/{name}/",
            name.replace('/', "-")
        );
        self.push_entry(name, format!("virtual:{hash}#npm:{version}"), location, &[]);
        self
    }

    /// Write package files below `.yarn/unplugged/`, returning the folder
    /// relative to `.yarn`
    fn write_unplugged(&self, name: &str, version: &str, files: &[(&str, &str)]) -> String {
        let folder = format!("unplugged/{}-npm-{version}", name.replace('/', "-"));
        for (relative, content) in files {
            self.write_file(
                &format!(".yarn/{folder}/node_modules/{name}/{relative}"),
                content,
            );
        }
        folder
    }

    /// Write a cache zip, returning its path relative to `.yarn`. `modes`
    /// pairs up with `files` when non-empty
    fn write_archive(
        &self,
        name: &str,
        version: &str,
        files: &[(&str, &str)],
        modes: &[u32],
    ) -> String {
        let archive = format!("cache/{}-npm-{version}-0123456789.zip", name.replace('/', "-"));
        let archive_path = self.path.join(".yarn").join(&archive);
        std::fs::create_dir_all(archive_path.parent().unwrap()).unwrap();

        let mut writer = zip::ZipWriter::new(std::fs::File::create(&archive_path).unwrap());
        for (index, (relative, content)) in files.iter().enumerate() {
            let mut options = zip::write::SimpleFileOptions::default();
            if let Some(mode) = modes.get(index) {
                options = options.unix_permissions(*mode);
            }
            writer
                .start_file(format!("node_modules/{name}/{relative}"), options)
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        archive
    }

    fn push_entry(
        &mut self,
        name: &str,
        reference: String,
        location: String,
        dependencies: &[(&str, &str)],
    ) {
        self.packages.push(RegistryEntry {
            name: name.to_string(),
            reference,
            location,
            dependencies: dependencies
                .iter()
                .map(|(dep, version)| (dep.to_string(), format!("npm:{version}")))
                .collect(),
        });
    }

    /// Write `.pnp.data.json`; the workspace depends on every added package
    pub fn install(self) -> Self {
        let workspace_dependencies: Vec<Value> = self
            .packages
            .iter()
            .map(|p| json!([p.name, p.reference]))
            .collect();

        let mut registry = vec![
            json!([null, [[null, {
                "packageLocation": "./",
                "packageDependencies": workspace_dependencies,
                "linkType": "SOFT"
            }]]]),
            json!([self.name, [["workspace:.", {
                "packageLocation": "./",
                "packageDependencies": workspace_dependencies,
                "linkType": "SOFT"
            }]]]),
        ];

        for package in &self.packages {
            let mut dependencies = vec![json!([package.name, package.reference])];
            dependencies.extend(
                package
                    .dependencies
                    .iter()
                    .map(|(name, reference)| json!([name, reference])),
            );
            registry.push(json!([package.name, [[package.reference, {
                "packageLocation": package.location,
                "packageDependencies": dependencies,
                "linkType": "HARD"
            }]]]));
        }

        let state = json!({
            "__info": ["This file is automatically generated."],
            "dependencyTreeRoots": [{ "name": self.name, "reference": "workspace:." }],
            "enableTopLevelFallback": true,
            "fallbackExclusionList": [],
            "fallbackPool": [],
            "ignorePatternData": null,
            "packageRegistryData": registry
        });
        self.write_file(
            ".pnp.data.json",
            &serde_json::to_string_pretty(&state).expect("Failed to serialize PnP state"),
        );
        self
    }

    /// Write a file relative to the project root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file relative to the project root
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a path exists relative to the project root
    #[allow(dead_code)]
    pub fn exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Sorted names of the entries directly inside `path`
    #[allow(dead_code)]
    pub fn children(&self, path: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.path.join(path))
            .expect("Failed to read directory")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
