use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::path::Path;

impl Repository {
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let data = self.workspace().read_file(Path::new(object_path))?;
        let is_binary = std::str::from_utf8(&data).is_err();
        let object = Blob::new(data.into(), is_binary);

        let object_id = object.object_id()?;

        writeln!(self.writer(), "{}", object_id)?;

        if !write {
            return Ok(());
        }

        self.ensure_initialized()?;
        self.database().store(&object)?;

        Ok(())
    }
}
