use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::BufRead;

pub trait Packable {
    /// Bytes written to the object file
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    /// Bytes the object ID is computed over
    ///
    /// Defaults to the stored form. Objects whose stored form is not
    /// canonical (pretty-printed records) override this.
    fn canonical(&self) -> Result<Bytes> {
        self.serialize()
    }

    fn object_id(&self) -> Result<ObjectId> {
        Ok(ObjectId::from_content(&self.canonical()?))
    }
}
