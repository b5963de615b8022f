
mod test_elevator;
mod test_moves;
mod test_parse;
