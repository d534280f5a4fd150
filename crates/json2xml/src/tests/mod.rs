mod truncation;
