// Pipeline processing: match file tree → flat delivery rows

pub mod flatten;
