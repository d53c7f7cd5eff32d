mod init_mode;
