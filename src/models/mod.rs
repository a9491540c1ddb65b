pub mod course;
pub mod course_code;
pub mod list_node;
pub mod loaders;
pub mod req_tree;

pub use course::{CourseRecord, Requisite};
pub use course_code::{is_valid_code, CourseCode};
pub use list_node::ListNode;
pub use loaders::{load_courses, save_courses};
pub use req_tree::{Operator, ReqNode};
