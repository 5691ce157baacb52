use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::io::Write;

impl Repository {
    /// Print an object, or only its type when `type_only` is set
    ///
    /// Blobs are written byte for byte; commits are rendered readably.
    pub fn cat_file(&mut self, object_id: &str, type_only: bool) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let object_id = ObjectId::try_parse(object_id.to_string())?;
        let object_type = self.database().get_object_type(&object_id)?;

        if type_only {
            writeln!(self.writer(), "{}", object_type)?;
            return Ok(());
        }

        match object_type {
            ObjectType::Blob => {
                let blob = self.database().parse_object_as_blob(&object_id)?;
                self.writer().write_all(blob.data())?;
            }
            ObjectType::Commit => {
                let commit = self.database().parse_object_as_commit(&object_id)?;
                writeln!(self.writer(), "{}", commit.display())?;
            }
        }

        Ok(())
    }
}
