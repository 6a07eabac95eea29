pub mod infile;
