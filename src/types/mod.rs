mod category;
mod catalog;
mod course;
mod period;
mod room;
mod schedule;
mod subject;
mod teacher;

pub use catalog::*;
pub use category::*;
pub use course::*;
pub use period::*;
pub use room::*;
pub use schedule::*;
pub use subject::*;
pub use teacher::*;

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(TeacherId);
id_newtype!(CourseId);
id_newtype!(RoomId);
id_newtype!(SubjectId);
id_newtype!(MergeGroupId);
id_newtype!(SplitGroupId);
