mod countries;
mod top_terms;
