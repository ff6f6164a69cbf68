mod kanjidic;
