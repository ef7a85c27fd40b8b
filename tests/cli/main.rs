mod reviews_cli;
