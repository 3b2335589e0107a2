pub mod ecosystem;
pub mod library_entry;
pub mod package;
pub mod parent_links;
pub mod repo_metadata;
pub mod resolved_set;

pub use ecosystem::Ecosystem;
pub use library_entry::LibraryEntry;
pub use package::{split_go_module_path, PackageName, PackageRecord, Version};
pub use parent_links::ParentLinks;
pub use repo_metadata::{DependencyManifest, RepoMetadata};
pub use resolved_set::{ResolvedEntry, ResolvedSet};
