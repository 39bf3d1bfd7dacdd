/// Random answer-cell selection and puzzle instances.
pub mod target;
