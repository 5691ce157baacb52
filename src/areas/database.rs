use crate::artifacts::core::GitxError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Content-addressed object store
///
/// Objects are files named by their digest. The store only grows:
/// there is no deletion, and writing a digest that is already present
/// is a no-op.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.is_file() {
            return Err(GitxError::NotFound(object_id.clone()).into());
        }

        self.read_object(object_path)
    }

    /// Write `content` under `object_id` unless it already exists
    ///
    /// The content is trusted to match the digest. Returns whether the
    /// object was written.
    pub fn put(&self, object_id: &ObjectId, content: &[u8], is_binary: bool) -> anyhow::Result<bool> {
        let object_path = self.path.join(object_id.to_path());

        if self.contains(object_id) {
            return Ok(false);
        }

        std::fs::create_dir_all(&self.path).context(format!(
            "Unable to create object directory {}",
            self.path.display()
        ))?;
        self.write_object(object_path, content)?;
        debug!(oid = %object_id, is_binary, size = content.len(), "stored object");

        Ok(true)
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let content = object.serialize()?;
        let is_binary = matches!(object.object_type(), ObjectType::Blob)
            && std::str::from_utf8(&content).is_err();

        self.put(&object_id, &content, is_binary)?;

        Ok(object_id)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        Blob::deserialize(Cursor::new(self.load(object_id)?))
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        Commit::deserialize(Cursor::new(self.load(object_id)?))
            .with_context(|| format!("Object {object_id} is not a commit"))
    }

    /// Commit records are JSON objects; anything else is a blob
    ///
    /// Objects carry no type header, so a blob whose bytes happen to form a
    /// valid commit record is reported as a commit.
    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let content = self.load(object_id)?;

        match Commit::deserialize(Cursor::new(content)) {
            Ok(_) => Ok(ObjectType::Commit),
            Err(_) => Ok(ObjectType::Blob),
        }
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: &[u8]) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        if let Err(err) = std::fs::rename(&temp_object_path, &object_path) {
            let _ = std::fs::remove_file(&temp_object_path);
            return Err(err).context(format!(
                "Unable to rename object file to {}",
                object_path.display()
            ));
        }

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
